//! # Type Tags
//!
//! `TypeTag` is the classifier's output vocabulary. The lower-case strings
//! returned by [`TypeTag::as_str`] are the contract with field-configuration
//! consumers (they pick a date picker for `date` and a free-text input for
//! everything else), so they must never change.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FieldTypeError;

/// The semantic type inferred for one raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// An ordered list.
    Array,
    /// A key/value object.
    Object,
    /// `true` or `false`.
    Boolean,
    /// A number, or a string made only of digits.
    Number,
    /// Any other string.
    String,
    /// A value that looks like a timestamp or a formatted date.
    Date,
    /// No rule matched (absent values, `null`).
    Undetermined,
}

impl TypeTag {
    /// Returns all tags in declaration order.
    pub fn all() -> &'static [TypeTag] {
        &[
            Self::Array,
            Self::Object,
            Self::Boolean,
            Self::Number,
            Self::String,
            Self::Date,
            Self::Undetermined,
        ]
    }

    /// Returns the lower-case identifier for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Object => "object",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Date => "date",
            Self::Undetermined => "undetermined",
        }
    }

    /// False only for [`TypeTag::Undetermined`].
    pub fn is_determined(&self) -> bool {
        !matches!(self, Self::Undetermined)
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = FieldTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| FieldTypeError::UnknownTag(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_round_trips_through_from_str() {
        for tag in TypeTag::all() {
            assert_eq!(tag.as_str().parse::<TypeTag>().unwrap(), *tag);
        }
    }

    #[test]
    fn test_serde_matches_as_str() {
        for tag in TypeTag::all() {
            let json = serde_json::to_string(tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert!("datetime".parse::<TypeTag>().is_err());
        assert!("Date".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_only_undetermined_is_undetermined() {
        let undetermined: Vec<_> = TypeTag::all().iter().filter(|t| !t.is_determined()).collect();
        assert_eq!(undetermined, vec![&TypeTag::Undetermined]);
    }
}
