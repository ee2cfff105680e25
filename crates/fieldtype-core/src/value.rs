//! # Raw Values
//!
//! `RawValue` is the borrowed, untyped view of one dataset cell. Datasets
//! arrive as JSON, so the container variants borrow straight from
//! `serde_json::Value`; scalars can also be built from plain Rust values.
//!
//! The classifier reasons about three derived facts of a value:
//!
//! - its *string form* (what string interpolation of the cell produces),
//! - its *truthiness* (`0`, `NaN`, `""`, `false`, `null` and absence are falsy),
//! - its primitive kind.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::number::format_number;

/// One raw dataset cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// No value at all (a missing key, an `undefined` cell).
    Absent,
    /// An explicit `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. JSON integers beyond 2^53 are rounded like any double.
    Number(f64),
    /// A string, numeric or otherwise.
    Text(&'a str),
    /// An ordered list.
    Sequence(&'a [Value]),
    /// A key/value object.
    Mapping(&'a Map<String, Value>),
}

impl<'a> RawValue<'a> {
    /// Returns true for the list and object variants.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }

    /// Returns true if the value is a number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns true if the value is a string.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Truthiness as a dashboard script would evaluate it.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Absent | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Sequence(_) | Self::Mapping(_) => true,
        }
    }

    /// The string form of a scalar value.
    ///
    /// Returns `None` for containers: their coerced form is never inspected.
    pub fn string_form(&self) -> Option<Cow<'a, str>> {
        match self {
            Self::Absent => Some(Cow::Borrowed("undefined")),
            Self::Null => Some(Cow::Borrowed("null")),
            Self::Bool(true) => Some(Cow::Borrowed("true")),
            Self::Bool(false) => Some(Cow::Borrowed("false")),
            Self::Number(n) => Some(Cow::Owned(format_number(*n))),
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }
}

impl<'a> From<&'a Value> for RawValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::Sequence(items),
            Value::Object(map) => Self::Mapping(map),
        }
    }
}

impl<'a> From<Option<&'a Value>> for RawValue<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(Self::Absent, Self::from)
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl From<bool> for RawValue<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawValue<'_> {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u64> for RawValue<'_> {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for RawValue<'_> {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// Length in UTF-16 code units, the unit string lengths are measured in.
pub(crate) fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// True when `s` is one or more ASCII digits.
pub(crate) fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// True when `s` is 10 to 13 ASCII digits, the epoch seconds/milliseconds shape.
pub(crate) fn is_epoch_shaped(s: &str) -> bool {
    (10..=13).contains(&s.len()) && is_all_digits(s)
}

/// Number of ASCII digits in `s`.
pub(crate) fn digit_count(s: &str) -> usize {
    s.bytes().filter(u8::is_ascii_digit).count()
}
