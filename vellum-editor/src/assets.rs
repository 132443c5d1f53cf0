use std::path::{Path, PathBuf};

use fs2::FileExt;

pub const EDITOR_HTML: &str = include_str!("../web/editor.html");
pub const EDITOR_JS: &str = include_str!("../web/editor.js");

const SCRIPT_SLOT: &str = "{{script}}";
const HEADER_SLOT: &str = "{{header}}";
const FOOTER_SLOT: &str = "{{footer}}";

/// Render the base template into a self-contained page.
///
/// The editor script is inlined first, then `header` lands at the end of
/// `<head>` (custom CSS, meta tags) and `footer` at the end of `<body>`
/// (extra scripts). These two slots are the only load-time configuration
/// surface the page offers.
pub fn render_page(header: &str, footer: &str) -> String {
    EDITOR_HTML
        .replace(SCRIPT_SLOT, EDITOR_JS)
        .replace(HEADER_SLOT, header)
        .replace(FOOTER_SLOT, footer)
}

/// Write a rendered page to `<data_dir>/vellum/editor.html` for web views
/// that can only load `file://` URIs. Returns the path to the written page.
pub fn write_page_to_data_dir(html: &str) -> Result<PathBuf, String> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| "Cannot determine data home directory".to_string())?;
    write_page_to(&data_dir.join("vellum"), html)
}

/// Write a rendered page into `dir` under an exclusive lock so concurrent
/// editor instances never observe a half-written file. The page is always
/// overwritten (header/footer may change between loads).
pub fn write_page_to(dir: &Path, html: &str) -> Result<PathBuf, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create page directory {:?}: {}", dir, e))?;

    let lock_path = dir.join(".write.lock");
    let lock_file = std::fs::File::create(&lock_path)
        .map_err(|e| format!("Failed to create lock file: {}", e))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| format!("Failed to acquire page lock: {}", e))?;

    let page_path = dir.join("editor.html");
    std::fs::write(&page_path, html)
        .map_err(|e| format!("Failed to write {:?}: {}", page_path, e))?;

    log::info!("Wrote editor page to {:?}", page_path);
    Ok(page_path)
}
