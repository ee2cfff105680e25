//! # Error Types
//!
//! Defines the error types of the date parsers and the dataset inspector.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Date parsers report *why* an input was rejected. The classifier treats
//!   every such error as "not a date" and never surfaces it.
//! - Inspection errors carry enough context to tell the caller which part of
//!   the dataset was unusable. Reading and parsing the dataset itself is the
//!   caller's concern.

use thiserror::Error;

/// Top-level error type for fieldtype.
#[derive(Error, Debug)]
pub enum FieldTypeError {
    /// The dataset does not have an inspectable shape.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// A string is not one of the known type tags.
    #[error("unknown type tag: {0:?}")]
    UnknownTag(String),

    /// YAML deserialization failed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Reasons a date parser rejects an input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateParseError {
    /// The input did not follow the expected token layout.
    #[error("unexpected input at offset {offset} in {input:?}")]
    Syntax {
        /// The rejected input.
        input: String,
        /// UTF-8 byte offset of the first unusable character.
        offset: usize,
    },

    /// A calendar or clock field was out of range.
    #[error("{field} out of range: {value}")]
    FieldRange {
        /// Name of the offending field (`month`, `day`, `hour`, ...).
        field: &'static str,
        /// The parsed value.
        value: i64,
    },

    /// The named weekday does not fall on the parsed date.
    #[error("weekday does not match date {date}")]
    WeekdayMismatch {
        /// The parsed calendar date.
        date: String,
    },

    /// The resulting instant is outside the representable time range.
    #[error("time value out of range: {0}")]
    OutOfRange(f64),

    /// No numeric component could be found.
    #[error("no timestamp in {0:?}")]
    NoTimestamp(String),

    /// Input did not match any format in the list.
    #[error("{input:?} matches none of {tried} formats")]
    NoFormatMatched {
        /// The rejected input.
        input: String,
        /// How many formats were attempted.
        tried: usize,
    },
}

impl DateParseError {
    pub(crate) fn syntax(input: &str, offset: usize) -> Self {
        Self::Syntax {
            input: input.to_string(),
            offset,
        }
    }
}
