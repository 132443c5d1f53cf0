use std::fmt::Write as _;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Commands: native → document (evaluated as script in the embedded page)
// ---------------------------------------------------------------------------

/// Name of the namespace object `editor.js` installs on the embedded page.
/// Every command serializes to a call on this object.
pub const BRIDGE_NAMESPACE: &str = "bridge";

/// A single command argument. Strings are escaped at serialization time;
/// numbers and booleans interpolate as script literals.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<&str> for Arg {
    fn from(value: &str) -> Arg {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Arg {
        Arg::Str(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Arg {
        Arg::Int(value as i64)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Arg {
        Arg::Int(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Arg {
        Arg::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Arg {
        Arg::Bool(value)
    }
}

/// An operation on the embedded editor: a name plus ordered arguments.
/// Built per facade call and consumed immediately by [`Command::to_script`].
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: &'static str,
    args: Vec<Arg>,
}

impl Command {
    pub fn new(name: &'static str) -> Command {
        Command {
            name,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<Arg>) -> Command {
        self.args.push(value.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Serialize into a script invocation, e.g. `bridge.setHtml('<p>x</p>');`.
    pub fn to_script(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 16);
        out.push_str(BRIDGE_NAMESPACE);
        out.push('.');
        out.push_str(self.name);
        out.push('(');
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match arg {
                Arg::Str(s) => {
                    out.push('\'');
                    out.push_str(&escape_js_string(s));
                    out.push('\'');
                }
                Arg::Int(n) => {
                    let _ = write!(out, "{}", n);
                }
                Arg::Float(x) => {
                    let _ = write!(out, "{}", x);
                }
                Arg::Bool(b) => {
                    let _ = write!(out, "{}", b);
                }
            }
        }
        out.push_str(");");
        out
    }
}

/// Escape `input` for use inside a single-quoted script string literal.
///
/// Covers both quote kinds, backslash, the control characters that terminate
/// a literal, and U+2028/U+2029, which script grammars treat as line
/// terminators even though they are valid in source text.
pub fn escape_js_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Notifications: document → native (drained from the page's queue)
// ---------------------------------------------------------------------------

/// One queued event string from the embedded page, decoded at the drain
/// boundary so the dispatcher works over a closed set of variants instead
/// of raw prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The editor script finished initializing.
    Ready,
    /// The document content changed.
    Input,
    Focus,
    Blur,
    /// A named action fired inside the page (e.g. a toolbar extension).
    Action(String),
    /// The selection or caret moved.
    Selection,
    /// Unrecognized token, preserved for logging and ignored otherwise.
    Unknown(String),
}

impl Notification {
    pub fn parse(raw: &str) -> Notification {
        match raw {
            "ready" => Notification::Ready,
            "input" => Notification::Input,
            "focus" => Notification::Focus,
            "blur" => Notification::Blur,
            "selection" => Notification::Selection,
            _ => {
                if let Some(name) = raw.strip_prefix("action/") {
                    if !name.is_empty() {
                        return Notification::Action(name.to_string());
                    }
                }
                Notification::Unknown(raw.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Character offsets of the current selection, as reported by the page
/// (`getSelectedRange()` returns a JSON `[start, end]` pair).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "[u32; 2]")]
pub struct SelectionRange {
    pub start: u32,
    pub end: u32,
}

impl From<[u32; 2]> for SelectionRange {
    fn from(pair: [u32; 2]) -> SelectionRange {
        SelectionRange {
            start: pair[0],
            end: pair[1],
        }
    }
}

impl SelectionRange {
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}
