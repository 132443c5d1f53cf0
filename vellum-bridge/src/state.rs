/// Bridge-side view of the embedded document.
///
/// Owned by the editor handle and only touched on the host event loop;
/// one instance maps to one embedded document.
#[derive(Debug)]
pub struct EditorState {
    /// The page finished loading; script evaluation is safe.
    pub is_document_loaded: bool,
    /// The editor script reported `ready`. Content and height delegate
    /// notifications are suppressed until this is set.
    pub is_ready: bool,
    /// Last fetched document body. Authoritative only after a fetch.
    pub content_html: String,
    pub editor_height: i32,
    /// HTML to apply once the editor reports ready.
    pub pending_html: Option<String>,
    pub editing_enabled: bool,
    pub placeholder_text: String,
    /// Template halves substituted into the page on (re)load.
    pub template_header: String,
    pub template_footer: String,
}

impl Default for EditorState {
    fn default() -> EditorState {
        EditorState {
            is_document_loaded: false,
            is_ready: false,
            content_html: String::new(),
            editor_height: 0,
            pending_html: None,
            editing_enabled: true,
            placeholder_text: String::new(),
            template_header: String::new(),
            template_footer: String::new(),
        }
    }
}
