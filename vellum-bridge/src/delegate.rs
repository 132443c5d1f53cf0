use vellum_editor::protocol::SelectionRange;

/// Callbacks from the bridge to the host application.
///
/// Every method has a no-op default, so implementors override only what
/// they observe. Callbacks run on the host event loop and may issue further
/// editor calls.
pub trait EditorDelegate {
    /// The rendered content height changed.
    fn on_height_change(&self, height: i32) {
        let _ = height;
    }

    /// The document content changed; `html` is the freshly fetched body.
    fn on_content_change(&self, html: &str) {
        let _ = html;
    }

    fn on_focus_gained(&self) {}

    fn on_focus_lost(&self) {}

    /// The editor finished loading and is accepting commands.
    fn on_load(&self) {}

    /// The user activated a hyperlink inside the document. Return `true`
    /// to allow the navigation; declining (the default) cancels it.
    fn on_link_activated(&self, url: &str) -> bool {
        let _ = url;
        false
    }

    /// The document reported a named custom action.
    fn on_custom_action(&self, name: &str) {
        let _ = name;
    }

    /// The selection moved. `attributes` lists the currently active format
    /// names (e.g. `bold`, `italic`).
    fn on_selection_change(&self, range: SelectionRange, attributes: &[String]) {
        let _ = (range, attributes);
    }
}
