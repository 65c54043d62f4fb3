//! A single subscript and its per-component collation.

use std::cmp::Ordering;
use std::fmt;

use mu_value::{Number, Value};
use serde::{Deserialize, Serialize};

/// One component of a subscript tuple.
///
/// Only these three kinds exist, so a key can never hold an unsupported
/// subscript type: anything else is rejected at compile time by the absence
/// of a `From` conversion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Subscript {
    /// Probe sentinel. Sorts before every other subscript and is never
    /// stored; it marks a position "before the first sibling".
    Null,
    /// Numeric subscript.
    Number(Number),
    /// String subscript.
    Str(String),
}

impl Subscript {
    /// Create a string subscript.
    #[inline]
    pub fn string(text: impl Into<String>) -> Self {
        Subscript::Str(text.into())
    }

    /// Returns `true` for the probe sentinel.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Subscript::Null)
    }

    /// Returns `true` for the empty string, which MUMPS callers use to
    /// request "start from the beginning" in traversal intrinsics.
    #[inline]
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Subscript::Str(s) if s.is_empty())
    }

    /// The subscript as a value. The sentinel becomes the empty string.
    pub fn to_value(&self) -> Value {
        match self {
            Subscript::Null => Value::empty(),
            Subscript::Number(n) => Value::number(*n),
            Subscript::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl Ord for Subscript {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Subscript::Null, Subscript::Null) => Ordering::Equal,
            (Subscript::Null, _) => Ordering::Less,
            (_, Subscript::Null) => Ordering::Greater,
            (Subscript::Number(a), Subscript::Number(b)) => a.cmp(b),
            (Subscript::Number(_), Subscript::Str(_)) => Ordering::Less,
            (Subscript::Str(_), Subscript::Number(_)) => Ordering::Greater,
            (Subscript::Str(a), Subscript::Str(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Subscript {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Subscript {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Subscript {}

/// Renders in MUMPS source form: numbers bare, strings quoted with inner
/// quotes doubled, the sentinel as `""`.
impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subscript::Null => f.write_str("\"\""),
            Subscript::Number(n) => write!(f, "{n}"),
            Subscript::Str(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
        }
    }
}

impl From<Number> for Subscript {
    fn from(value: Number) -> Self {
        Subscript::Number(value)
    }
}

impl From<i64> for Subscript {
    fn from(value: i64) -> Self {
        Subscript::Number(Number::Int(value))
    }
}

impl From<i32> for Subscript {
    fn from(value: i32) -> Self {
        Subscript::Number(Number::Int(i64::from(value)))
    }
}

impl From<u32> for Subscript {
    fn from(value: u32) -> Self {
        Subscript::Number(Number::Int(i64::from(value)))
    }
}

impl From<usize> for Subscript {
    #[allow(clippy::cast_precision_loss, reason = "only reached above i64::MAX")]
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(v) => Subscript::Number(Number::Int(v)),
            Err(_) => Subscript::Number(Number::float(value as f64)),
        }
    }
}

impl From<f64> for Subscript {
    fn from(value: f64) -> Self {
        Subscript::Number(Number::float(value))
    }
}

impl From<&str> for Subscript {
    fn from(value: &str) -> Self {
        Subscript::Str(value.to_owned())
    }
}

impl From<String> for Subscript {
    fn from(value: String) -> Self {
        Subscript::Str(value)
    }
}

impl From<&Subscript> for Subscript {
    fn from(value: &Subscript) -> Self {
        value.clone()
    }
}

/// Numbers stay numbers and strings stay strings: the string `"2"` and the
/// number `2` are distinct subscripts.
impl From<&Value> for Subscript {
    fn from(value: &Value) -> Self {
        match value {
            Value::Int(i) => Subscript::Number(Number::Int(*i)),
            Value::Float(f) => Subscript::Number(Number::float(*f)),
            Value::Str(s) => Subscript::Str(s.clone()),
        }
    }
}

impl From<Value> for Subscript {
    fn from(value: Value) -> Self {
        match value {
            Value::Str(s) => Subscript::Str(s),
            other => Subscript::from(&other),
        }
    }
}
