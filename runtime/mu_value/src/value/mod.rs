//! Stored values and their coerced views.
//!
//! `Value` is what a variable node holds. It remembers whether it was
//! produced as a number or as a string, because the string view of a
//! string is the string itself (`"007"` stays `"007"`) while the string
//! view of a number is its canonical spelling (`7`).
//!
//! `Coerced` is the derived (string view, numeric view) pair that operators
//! work on. It is computed once and never changes.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::number::Number;
use crate::parse::parse_number;

/// A scalar stored in a variable node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Integer produced by arithmetic or supplied by the host.
    Int(i64),
    /// Float produced by arithmetic or supplied by the host.
    Float(f64),
    /// String value, coerced lazily when a numeric view is needed.
    Str(String),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    /// The empty string, MUMPS's "no value" result.
    #[inline]
    pub fn empty() -> Self {
        Value::Str(String::new())
    }

    /// Create a value from a numeric view.
    #[inline]
    pub fn number(number: Number) -> Self {
        match number {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
        }
    }

    /// Truth value as `Int(1)` / `Int(0)`.
    #[inline]
    pub fn truth(flag: bool) -> Self {
        Value::Int(i64::from(flag))
    }

    /// The numeric view.
    pub fn to_number(&self) -> Number {
        match self {
            Value::Int(i) => Number::Int(*i),
            Value::Float(f) => Number::float(*f),
            Value::Str(s) => parse_number(s),
        }
    }

    /// The string view.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Str(s) => Cow::Borrowed(s),
            Value::Int(_) | Value::Float(_) => Cow::Owned(self.to_string()),
        }
    }

    /// MUMPS truth: the numeric view is non-zero.
    #[inline]
    pub fn is_true(&self) -> bool {
        !self.to_number().is_zero()
    }

    /// Returns `true` for the numeric variants.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Returns `true` for the empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }

    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{}", Number::float(*x)),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::truth(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::number(value)
    }
}

/// Immutable dual view of a value: its string form and its numeric form.
#[derive(Clone, Debug, PartialEq)]
pub struct Coerced {
    text: String,
    number: Number,
}

impl Coerced {
    /// Derive both views from an optional value. An absent value has the
    /// empty string view and numeric view zero.
    pub fn new(value: Option<&Value>) -> Self {
        match value {
            Some(value) => Coerced {
                text: value.as_text().into_owned(),
                number: value.to_number(),
            },
            None => Coerced {
                text: String::new(),
                number: Number::ZERO,
            },
        }
    }

    /// The string view.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The numeric view.
    #[inline]
    pub fn number(&self) -> Number {
        self.number
    }

    /// MUMPS truth of the numeric view.
    #[inline]
    pub fn is_true(&self) -> bool {
        !self.number.is_zero()
    }

    /// Re-derive a value from the numeric view (unary `+`).
    pub fn to_numeric_value(&self) -> Value {
        Value::number(self.number)
    }
}

impl From<&Value> for Coerced {
    fn from(value: &Value) -> Self {
        Coerced::new(Some(value))
    }
}
