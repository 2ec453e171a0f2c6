use std::fmt;

use serde::Serialize;

use crate::error::Result;

/// A single piece of log content.
///
/// `Display` gives the plain string form joined into the default body,
/// while `Serialize` lets a JSON parser render the whole content list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Json(serde_json::Value),
}

impl LogValue {
    /// Captures any serializable value as structured JSON content.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(LogValue::Json(serde_json::to_value(value)?))
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Null => f.write_str("null"),
            LogValue::Bool(b) => write!(f, "{}", b),
            LogValue::Int(i) => write!(f, "{}", i),
            LogValue::Float(x) => write!(f, "{}", x),
            LogValue::Str(s) => f.write_str(s),
            LogValue::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Str(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Str(s)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<i32> for LogValue {
    fn from(i: i32) -> Self {
        LogValue::Int(i.into())
    }
}

impl From<i64> for LogValue {
    fn from(i: i64) -> Self {
        LogValue::Int(i)
    }
}

impl From<u32> for LogValue {
    fn from(i: u32) -> Self {
        LogValue::Int(i.into())
    }
}

impl From<f64> for LogValue {
    fn from(x: f64) -> Self {
        LogValue::Float(x)
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(v: serde_json::Value) -> Self {
        LogValue::Json(v)
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(LogValue::Null)
    }
}

/// Builds a `Vec<LogValue>` from heterogeneous expressions.
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::LogValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::LogValue::from($value)),+]
    };
}

/// Default body: each value's string form separated by `;`.
pub fn join_contents(contents: &[LogValue]) -> String {
    contents
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(";")
}
