use serde::de::DeserializeOwned;

use crate::host::RawValue;

/// A script result after translation.
///
/// The embedded document returns primitives only, so composite values
/// (selection ranges, attribute lists, the notification queue) travel as
/// JSON-encoded text. Translation decodes those once, here; everything else
/// passes through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Json(serde_json::Value),
}

impl ScriptValue {
    /// Translate a raw evaluation result. Text shaped like a JSON document
    /// or array is decoded; text that fails to decode stays raw.
    pub fn from_raw(raw: RawValue) -> ScriptValue {
        match raw {
            RawValue::Absent => ScriptValue::Empty,
            RawValue::Number(n) => ScriptValue::Number(n),
            RawValue::Bool(b) => ScriptValue::Bool(b),
            RawValue::Text(text) => {
                let trimmed = text.trim_start();
                if trimmed.starts_with('{') || trimmed.starts_with('[') {
                    match serde_json::from_str(&text) {
                        Ok(value) => ScriptValue::Json(value),
                        Err(_) => ScriptValue::Text(text),
                    }
                } else {
                    ScriptValue::Text(text)
                }
            }
        }
    }

    /// Read the value as text. `Empty` is the empty string; scalars render
    /// their natural form.
    pub fn into_text(self) -> String {
        match self {
            ScriptValue::Empty => String::new(),
            ScriptValue::Text(s) => s,
            ScriptValue::Number(n) => n.to_string(),
            ScriptValue::Bool(b) => b.to_string(),
            ScriptValue::Json(v) => v.to_string(),
        }
    }

    /// Read the value as a flag. The page reports booleans as the strings
    /// `"true"`/`"false"`; anything else is `false`.
    pub fn as_bool(&self) -> bool {
        match self {
            ScriptValue::Bool(b) => *b,
            ScriptValue::Text(s) => s == "true",
            _ => false,
        }
    }

    /// Decode a structured payload. `None` when the value is not JSON of
    /// the expected shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        match self {
            ScriptValue::Json(v) => serde_json::from_value(v.clone()).ok(),
            _ => None,
        }
    }
}
