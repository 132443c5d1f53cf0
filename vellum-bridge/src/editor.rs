use std::cell::RefCell;
use std::rc::{Rc, Weak};

use vellum_editor::assets;
use vellum_editor::protocol::{Command, Notification, SelectionRange};

use crate::delegate::EditorDelegate;
use crate::host::{DocumentHost, ScriptCompletion};
use crate::navigation::{NavigationDecision, NavigationKind, CALLBACK_SCHEME};
use crate::state::EditorState;
use crate::value::ScriptValue;

/// Handle for driving a rich-text editor running inside an embedded web
/// document.
///
/// There is no synchronous call path into the document: commands go out as
/// script evaluations through the [`DocumentHost`], and the document reports
/// back by queueing notification strings and signalling on the reserved
/// callback scheme. The handle owns the bridge-side state and forwards
/// observable changes to the [`EditorDelegate`].
///
/// All methods must be called on the host event loop; the handle is
/// `Rc`-shared and never crosses threads.
pub struct RichEditorHandle {
    weak_self: Weak<RichEditorHandle>,
    host: Rc<dyn DocumentHost>,
    state: RefCell<EditorState>,
    delegate: RefCell<Option<Rc<dyn EditorDelegate>>>,
}

impl RichEditorHandle {
    pub fn new(host: Rc<dyn DocumentHost>) -> Rc<RichEditorHandle> {
        Rc::new_cyclic(|weak| RichEditorHandle {
            weak_self: weak.clone(),
            host,
            state: RefCell::new(EditorState::default()),
            delegate: RefCell::new(None),
        })
    }

    pub fn set_delegate(&self, delegate: Rc<dyn EditorDelegate>) {
        *self.delegate.borrow_mut() = Some(delegate);
    }

    // Cloned out so a delegate callback can re-enter the handle.
    fn delegate(&self) -> Option<Rc<dyn EditorDelegate>> {
        self.delegate.borrow().clone()
    }

    // ── Script submission ────────────────────────────────────────────────

    /// Evaluate `script` and hand the translated result to `handler`.
    ///
    /// The handler always runs: evaluation failures and calls made before
    /// the document has loaded complete with [`ScriptValue::Empty`].
    fn run_script<F>(&self, script: String, handler: F)
    where
        F: FnOnce(ScriptValue) + 'static,
    {
        if !self.state.borrow().is_document_loaded {
            log::debug!("document not loaded, completing {:?} with empty result", script);
            handler(ScriptValue::Empty);
            return;
        }
        self.host.evaluate_script(
            &script,
            ScriptCompletion::new(move |result| {
                let value = match result {
                    Ok(raw) => ScriptValue::from_raw(raw),
                    Err(err) => {
                        log::warn!("script evaluation failed: {}", err);
                        ScriptValue::Empty
                    }
                };
                handler(value);
            }),
        );
    }

    /// Fire-and-forget command; dropped with a warning when the document
    /// is not loaded.
    fn run_command(&self, command: Command) {
        if !self.state.borrow().is_document_loaded {
            log::warn!("document not loaded, dropping command {}", command.name());
            return;
        }
        let name = command.name();
        self.host.evaluate_script(
            &command.to_script(),
            ScriptCompletion::new(move |result| {
                if let Err(err) = result {
                    log::warn!("command {} failed: {}", name, err);
                }
            }),
        );
    }

    // ── Loading ──────────────────────────────────────────────────────────

    /// Render the template and (re)load it into the document.
    ///
    /// Resets the load/ready flags, so the next `ready` notification is
    /// processed again. Current content is carried over as pending HTML and
    /// re-applied when the new document reports ready.
    pub fn load(&self) {
        let page = {
            let mut st = self.state.borrow_mut();
            st.is_document_loaded = false;
            st.is_ready = false;
            if st.pending_html.is_none() && !st.content_html.is_empty() {
                st.pending_html = Some(st.content_html.clone());
            }
            assets::render_page(&st.template_header, &st.template_footer)
        };
        self.host.load_page(&page);
    }

    /// The host integration reports that the page finished loading and
    /// script evaluation is safe.
    ///
    /// Also fetches the notification backlog once: the page may have
    /// signalled (typically `ready`) while the load was still in flight,
    /// and those drains were deferred.
    pub fn document_did_load(&self) {
        self.state.borrow_mut().is_document_loaded = true;
        self.drain_notification_queue();
    }

    /// Replace the template header (end of `<head>`) and reload.
    pub fn set_template_header(&self, header: &str) {
        self.state.borrow_mut().template_header = header.to_string();
        self.load();
    }

    /// Replace the template footer (end of `<body>`) and reload.
    pub fn set_template_footer(&self, footer: &str) {
        self.state.borrow_mut().template_footer = footer.to_string();
        self.load();
    }

    // ── Navigation interception ──────────────────────────────────────────

    /// Decide a navigation request observed by the host web view.
    ///
    /// Callback-scheme URLs are consumed as queue signals and always
    /// cancelled; user link activations are referred to the delegate and
    /// cancelled unless it approves; everything else (initial load,
    /// redirects) proceeds.
    pub fn decide_navigation(&self, url: &str, kind: NavigationKind) -> NavigationDecision {
        if url.starts_with(CALLBACK_SCHEME) {
            self.drain_notification_queue();
            return NavigationDecision::Cancel;
        }
        if kind == NavigationKind::LinkActivated {
            let allowed = self
                .delegate()
                .map(|d| d.on_link_activated(url))
                .unwrap_or(false);
            return if allowed {
                NavigationDecision::Allow
            } else {
                NavigationDecision::Cancel
            };
        }
        NavigationDecision::Allow
    }

    // ── Queue drain & dispatch ───────────────────────────────────────────

    /// Fetch the pending notification backlog and dispatch it in order.
    ///
    /// A payload that is not a JSON array of strings abandons the whole
    /// batch; partial processing never happens.
    fn drain_notification_queue(&self) {
        if !self.state.borrow().is_document_loaded {
            // Signals can race ahead of load completion; document_did_load
            // fetches the backlog.
            log::debug!("deferring queue drain until the document loads");
            return;
        }
        let weak = self.weak_self.clone();
        self.run_script(Command::new("getCommandQueue").to_script(), move |value| {
            let Some(this) = weak.upgrade() else {
                return;
            };
            let Some(batch) = value.decode::<Vec<String>>() else {
                log::warn!("malformed notification queue payload: {:?}", value);
                return;
            };
            for raw in &batch {
                this.dispatch(Notification::parse(raw));
            }
        });
    }

    fn dispatch(&self, notification: Notification) {
        match notification {
            Notification::Ready => self.handle_ready(),
            Notification::Input => {
                if self.state.borrow().is_ready {
                    self.refresh_content(None);
                }
            }
            Notification::Focus => {
                if let Some(d) = self.delegate() {
                    d.on_focus_gained();
                }
            }
            Notification::Blur => {
                if let Some(d) = self.delegate() {
                    d.on_focus_lost();
                }
            }
            Notification::Action(name) => self.refresh_content(Some(name)),
            Notification::Selection => self.refresh_selection(),
            Notification::Unknown(raw) => {
                log::debug!("ignoring unknown notification {:?}", raw);
            }
        }
    }

    /// First `ready` per load: replay buffered state into the fresh
    /// document, then open the delegate gate. Repeats are no-ops.
    fn handle_ready(&self) {
        {
            let mut st = self.state.borrow_mut();
            // A drained `ready` proves the script environment is alive even
            // if the host never reported load completion.
            st.is_document_loaded = true;
            if st.is_ready {
                return;
            }
        }
        let (pending, editable, placeholder) = {
            let mut st = self.state.borrow_mut();
            (
                st.pending_html.take(),
                st.editing_enabled,
                st.placeholder_text.clone(),
            )
        };
        if let Some(html) = pending {
            self.state.borrow_mut().content_html = html.clone();
            self.run_command(Command::new("setHtml").arg(html));
        }
        self.run_command(Command::new("setEditable").arg(editable));
        if !placeholder.is_empty() {
            self.run_command(Command::new("setPlaceholderText").arg(placeholder));
        }
        self.state.borrow_mut().is_ready = true;
        if let Some(d) = self.delegate() {
            d.on_load();
        }
    }

    /// Re-fetch the document body, then the rendered height.
    ///
    /// With `action` set this is an `action/<name>` notification: the
    /// delegate hears `on_custom_action` (with the refreshed content
    /// already cached). Otherwise `on_content_change` fires, but only when
    /// the content actually changed and the editor is ready.
    fn refresh_content(&self, action: Option<String>) {
        let weak = self.weak_self.clone();
        self.run_script(Command::new("getHtml").to_script(), move |value| {
            let Some(this) = weak.upgrade() else {
                return;
            };
            let html = value.into_text();
            let (changed, ready) = {
                let mut st = this.state.borrow_mut();
                let changed = st.content_html != html;
                st.content_html = html.clone();
                (changed, st.is_ready)
            };
            match action {
                Some(name) => {
                    if let Some(d) = this.delegate() {
                        d.on_custom_action(&name);
                    }
                }
                None => {
                    if changed && ready {
                        if let Some(d) = this.delegate() {
                            d.on_content_change(&html);
                        }
                    }
                }
            }
            this.refresh_height();
        });
    }

    fn refresh_height(&self) {
        let weak = self.weak_self.clone();
        self.run_script(Command::new("getClientHeight").to_script(), move |value| {
            let Some(this) = weak.upgrade() else {
                return;
            };
            let height = match &value {
                ScriptValue::Number(n) => *n as i32,
                ScriptValue::Text(s) => match s.parse::<i32>() {
                    Ok(h) => h,
                    Err(_) => return,
                },
                _ => return,
            };
            let (changed, ready) = {
                let mut st = this.state.borrow_mut();
                let changed = st.editor_height != height;
                st.editor_height = height;
                (changed, st.is_ready)
            };
            if changed && ready {
                if let Some(d) = this.delegate() {
                    d.on_height_change(height);
                }
            }
        });
    }

    /// Selection moved: fetch the range, then the active attributes, in
    /// that order, and only then notify the delegate. Either payload
    /// failing to decode abandons the notification with a diagnostic.
    fn refresh_selection(&self) {
        let weak = self.weak_self.clone();
        self.run_script(Command::new("getSelectedRange").to_script(), move |value| {
            let Some(this) = weak.upgrade() else {
                return;
            };
            let Some(range) = value.decode::<SelectionRange>() else {
                log::warn!("malformed selection range payload: {:?}", value);
                return;
            };
            let weak = this.weak_self.clone();
            this.run_script(
                Command::new("getActiveAttributes").to_script(),
                move |value| {
                    let Some(this) = weak.upgrade() else {
                        return;
                    };
                    let Some(attributes) = value.decode::<Vec<String>>() else {
                        log::warn!("malformed attribute list payload: {:?}", value);
                        return;
                    };
                    if let Some(d) = this.delegate() {
                        d.on_selection_change(range, &attributes);
                    }
                },
            );
        });
    }

    // ── Content & editability ────────────────────────────────────────────

    /// Set the document body.
    ///
    /// Before the editor reports ready the value is buffered and applied on
    /// the ready transition; afterwards it is submitted immediately.
    pub fn set_html(&self, html: &str) {
        let ready = {
            let mut st = self.state.borrow_mut();
            st.content_html = html.to_string();
            if !st.is_ready {
                st.pending_html = Some(html.to_string());
            }
            st.is_ready
        };
        if ready {
            self.run_command(Command::new("setHtml").arg(html));
        }
    }

    pub fn set_editable(&self, editable: bool) {
        let ready = {
            let mut st = self.state.borrow_mut();
            st.editing_enabled = editable;
            st.is_ready
        };
        if ready {
            self.run_command(Command::new("setEditable").arg(editable));
        }
    }

    pub fn set_placeholder(&self, text: &str) {
        let ready = {
            let mut st = self.state.borrow_mut();
            st.placeholder_text = text.to_string();
            st.is_ready
        };
        if ready {
            self.run_command(Command::new("setPlaceholderText").arg(text));
        }
    }

    /// Last fetched document body.
    pub fn content_html(&self) -> String {
        self.state.borrow().content_html.clone()
    }

    /// Last fetched content height.
    pub fn editor_height(&self) -> i32 {
        self.state.borrow().editor_height
    }

    pub fn is_document_loaded(&self) -> bool {
        self.state.borrow().is_document_loaded
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_ready
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn fetch_html<F: FnOnce(String) + 'static>(&self, handler: F) {
        self.run_script(Command::new("getHtml").to_script(), |v| {
            handler(v.into_text())
        });
    }

    pub fn fetch_text<F: FnOnce(String) + 'static>(&self, handler: F) {
        self.run_script(Command::new("getText").to_script(), |v| {
            handler(v.into_text())
        });
    }

    /// Whether a non-collapsed selection exists.
    pub fn fetch_range_selection_exists<F: FnOnce(bool) + 'static>(&self, handler: F) {
        self.run_script(Command::new("rangeSelectionExists").to_script(), |v| {
            handler(v.as_bool())
        });
    }

    /// The href of the link under the caret, if any.
    pub fn fetch_selected_href<F: FnOnce(Option<String>) + 'static>(&self, handler: F) {
        self.run_script(Command::new("getSelectedHref").to_script(), |v| {
            let href = v.into_text();
            handler(if href.is_empty() { None } else { Some(href) })
        });
    }

    pub fn fetch_editable<F: FnOnce(bool) + 'static>(&self, handler: F) {
        self.run_script(Command::new("isEditable").to_script(), |v| {
            handler(v.as_bool())
        });
    }

    // ── Formatting commands ──────────────────────────────────────────────

    pub fn remove_format(&self) {
        self.run_command(Command::new("removeFormat"));
    }

    pub fn set_bold(&self) {
        self.run_command(Command::new("setBold"));
    }

    pub fn set_italic(&self) {
        self.run_command(Command::new("setItalic"));
    }

    pub fn set_underline(&self) {
        self.run_command(Command::new("setUnderline"));
    }

    pub fn set_strikethrough(&self) {
        self.run_command(Command::new("setStrikethrough"));
    }

    pub fn set_subscript(&self) {
        self.run_command(Command::new("setSubscript"));
    }

    pub fn set_superscript(&self) {
        self.run_command(Command::new("setSuperscript"));
    }

    /// `size` uses the HTML font size scale, 1-7.
    pub fn set_font_size(&self, size: i32) {
        self.run_command(Command::new("setFontSize").arg(size));
    }

    pub fn set_text_color(&self, color: &str) {
        self.run_command(Command::new("setTextColor").arg(color));
    }

    pub fn set_highlight_color(&self, color: &str) {
        self.run_command(Command::new("setHighlightColor").arg(color));
    }

    /// `level` is the heading level, 1-6.
    pub fn set_heading(&self, level: i32) {
        self.run_command(Command::new("setHeading").arg(level));
    }

    pub fn set_unordered_list(&self) {
        self.run_command(Command::new("setUnorderedList"));
    }

    pub fn set_ordered_list(&self) {
        self.run_command(Command::new("setOrderedList"));
    }

    pub fn align_left(&self) {
        self.run_command(Command::new("alignLeft"));
    }

    pub fn align_center(&self) {
        self.run_command(Command::new("alignCenter"));
    }

    pub fn align_right(&self) {
        self.run_command(Command::new("alignRight"));
    }

    pub fn indent(&self) {
        self.run_command(Command::new("indent"));
    }

    pub fn outdent(&self) {
        self.run_command(Command::new("outdent"));
    }

    pub fn undo(&self) {
        self.run_command(Command::new("undo"));
    }

    pub fn redo(&self) {
        self.run_command(Command::new("redo"));
    }

    pub fn insert_link(&self, href: &str, title: &str) {
        self.run_command(Command::new("insertLink").arg(href).arg(title));
    }

    pub fn insert_image(&self, src: &str, alt: &str) {
        self.run_command(Command::new("insertImage").arg(src).arg(alt));
    }

    pub fn focus(&self) {
        self.run_command(Command::new("focus"));
    }

    pub fn blur(&self) {
        self.run_command(Command::new("blur"));
    }
}
