//! The seam between the bridge and whatever embeds the web document.
//!
//! A host integration wraps its web view (WebKit, wry, a test double) in
//! [`DocumentHost`] and forwards navigation requests and load completion to
//! the editor handle. Nothing in this crate touches a toolkit directly.

/// Raw result of one script evaluation, as the embedded document reports it.
///
/// Web content can only hand back primitives; composite values arrive as
/// JSON-encoded text and are decoded once, at the translation seam
/// ([`crate::value::ScriptValue::from_raw`]), not ad hoc at call sites.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// The script produced no value (`undefined`/`null`).
    Absent,
    Text(String),
    Number(f64),
    Bool(bool),
}

/// One-shot continuation for a submitted script.
///
/// `resolve` consumes the completion, so a result is delivered at most
/// once; dropping an unresolved completion models a script that never
/// finishes.
pub struct ScriptCompletion {
    handler: Box<dyn FnOnce(Result<RawValue, String>)>,
}

impl ScriptCompletion {
    pub fn new<F>(handler: F) -> ScriptCompletion
    where
        F: FnOnce(Result<RawValue, String>) + 'static,
    {
        ScriptCompletion {
            handler: Box::new(handler),
        }
    }

    pub fn resolve(self, result: Result<RawValue, String>) {
        (self.handler)(result);
    }
}

impl std::fmt::Debug for ScriptCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ScriptCompletion")
    }
}

/// What the embedded web document must provide: asynchronous script
/// evaluation and page loading.
///
/// `evaluate_script` must resolve the completion exactly once when the
/// evaluation finishes (successfully or not), on the same event loop the
/// bridge runs on. A completion may be dropped if the evaluation can never
/// finish; the bridge treats that as a result that never arrives.
pub trait DocumentHost {
    fn evaluate_script(&self, script: &str, completion: ScriptCompletion);

    /// Replace the document with `html`.
    fn load_page(&self, html: &str);
}
