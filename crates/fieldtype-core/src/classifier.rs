//! # Type Classifier
//!
//! Infers a [`TypeTag`] for one raw dataset value.
//!
//! ## Rule Table
//!
//! Classification is an ordered table of named predicate → tag rules,
//! [`RULES`]. Every rule is evaluated in order and each match overwrites the
//! tag chosen so far:
//!
//! | # | Rule | Phase | Tag |
//! |---|------|-------|-----|
//! | 1 | `sequence` | base | `array` |
//! | 2 | `mapping` | base | `object` |
//! | 3 | `boolean` | base | `boolean` |
//! | 4 | `numeric`: a number, or a string of digits only | base | `number` |
//! | 5 | `text`: any other string | base | `string` |
//! | 6a | `epoch_like_timestamp` | override | `date` |
//! | 6b | `formatted_date` | override | `date` |
//! | 6c | `epoch_seconds_text` | override | `date` |
//! | 6d | `epoch_seconds_number` | override | `date` |
//!
//! The base rules are mutually exclusive. The override rules run last so that
//! epoch timestamps and formatted date strings, which the base rules tag as
//! `number` or `string`, end up as `date`. Override rules only consider
//! truthy scalars: `0`, `NaN`, `""`, `false`, `null`, absent values and
//! containers are never dates.
//!
//! ## Known False Positives
//!
//! The epoch heuristics are deliberately approximate. Any ten-digit number
//! starting with `1` (phone numbers, order IDs) and any number of 10 to 13
//! digits starting with `1` or `2` classifies as `date`, as does any number
//! whose rendered form is longer than nine characters, starts with `1` or
//! `2` and has 4 to 13 digits (`1234567.891`). Consumers rely on this
//! behaviour, so it is preserved and pinned by characterization tests.
//!
//! ## Failure Model
//!
//! Classification is total. Date parser errors are "no match" for the rule
//! that hit them and are only visible at `trace` level.

use std::borrow::Cow;

use serde::Serialize;
use tracing::trace;

use crate::error::DateParseError;
use crate::tag::TypeTag;
use crate::temporal::{match_date_formats, parse_epoch_seconds, parse_lenient, time_clip};
use crate::value::{digit_count, is_all_digits, is_epoch_shaped, utf16_len, RawValue};

/// Identifies one rule of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// An ordered list.
    Sequence,
    /// A key/value object.
    Mapping,
    /// A boolean.
    Boolean,
    /// A number, or a string made only of digits.
    Numeric,
    /// A string that is not made only of digits.
    Text,
    /// A parseable timestamp whose rendered form looks like epoch seconds or
    /// milliseconds (or a long date string starting with `1`/`2`).
    EpochLikeTimestamp,
    /// A strict match against the date format list.
    FormattedDate,
    /// A ten-digit string read as epoch seconds.
    EpochSecondsText,
    /// A ten-character number starting with `1` read as epoch seconds.
    EpochSecondsNumber,
}

impl RuleId {
    /// Returns the snake_case identifier for this rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::EpochLikeTimestamp => "epoch_like_timestamp",
            Self::FormattedDate => "formatted_date",
            Self::EpochSecondsText => "epoch_seconds_text",
            Self::EpochSecondsNumber => "epoch_seconds_number",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a rule assigns a first tag or overrides an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Structural rules, mutually exclusive.
    Base,
    /// Date rules, evaluated after every base rule.
    Override,
}

/// One entry of the classification table.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Rule identity.
    pub id: RuleId,
    /// Tag assigned when the rule matches.
    pub tag: TypeTag,
    /// Evaluation phase.
    pub phase: Phase,
    test: fn(&Subject<'_>) -> bool,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl Rule {
    /// Returns true if this rule matches `value`.
    pub fn matches(&self, value: RawValue<'_>) -> bool {
        (self.test)(&Subject::new(value))
    }
}

/// The classification table, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        id: RuleId::Sequence,
        tag: TypeTag::Array,
        phase: Phase::Base,
        test: is_sequence,
    },
    Rule {
        id: RuleId::Mapping,
        tag: TypeTag::Object,
        phase: Phase::Base,
        test: is_mapping,
    },
    Rule {
        id: RuleId::Boolean,
        tag: TypeTag::Boolean,
        phase: Phase::Base,
        test: is_boolean,
    },
    Rule {
        id: RuleId::Numeric,
        tag: TypeTag::Number,
        phase: Phase::Base,
        test: is_numeric,
    },
    Rule {
        id: RuleId::Text,
        tag: TypeTag::String,
        phase: Phase::Base,
        test: is_text,
    },
    Rule {
        id: RuleId::EpochLikeTimestamp,
        tag: TypeTag::Date,
        phase: Phase::Override,
        test: is_epoch_like_timestamp,
    },
    Rule {
        id: RuleId::FormattedDate,
        tag: TypeTag::Date,
        phase: Phase::Override,
        test: is_formatted_date,
    },
    Rule {
        id: RuleId::EpochSecondsText,
        tag: TypeTag::Date,
        phase: Phase::Override,
        test: is_epoch_seconds_text,
    },
    Rule {
        id: RuleId::EpochSecondsNumber,
        tag: TypeTag::Date,
        phase: Phase::Override,
        test: is_epoch_seconds_number,
    },
];

/// The outcome of classifying one value, with the rules that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// The final tag.
    pub tag: TypeTag,
    /// Every rule that matched, in evaluation order.
    pub fired: Vec<RuleId>,
    /// The first date format that matched, when [`RuleId::FormattedDate`] fired.
    pub matched_format: Option<&'static str>,
}

/// Classify one raw value.
///
/// Pure, deterministic and total: returns [`TypeTag::Undetermined`] when no
/// rule matches.
///
/// ```
/// use fieldtype_core::{classify, TypeTag};
///
/// assert_eq!(classify("hello"), TypeTag::String);
/// assert_eq!(classify("42"), TypeTag::Number);
/// assert_eq!(classify("2023-05-17"), TypeTag::Date);
/// assert_eq!(classify(1_684_296_000_i64), TypeTag::Date);
/// ```
pub fn classify<'a>(value: impl Into<RawValue<'a>>) -> TypeTag {
    let subject = Subject::new(value.into());
    let mut tag = TypeTag::Undetermined;
    for rule in RULES {
        if (rule.test)(&subject) {
            tag = apply(tag, rule);
        }
    }
    tag
}

/// Classify one raw value and report which rules matched.
///
/// `explain(v).tag == classify(v)` for every input.
pub fn explain<'a>(value: impl Into<RawValue<'a>>) -> Classification {
    let subject = Subject::new(value.into());
    let mut tag = TypeTag::Undetermined;
    let mut fired = Vec::new();
    for rule in RULES {
        if (rule.test)(&subject) {
            tag = apply(tag, rule);
            fired.push(rule.id);
        }
    }

    let matched_format = if fired.contains(&RuleId::FormattedDate) {
        subject
            .text()
            .and_then(|text| match_date_formats(text).ok())
            .map(|format| format.pattern())
    } else {
        None
    };

    Classification {
        tag,
        fired,
        matched_format,
    }
}

fn apply(current: TypeTag, rule: &Rule) -> TypeTag {
    if rule.phase == Phase::Override && current != rule.tag {
        trace!(rule = %rule.id, from = %current, to = %rule.tag, "override");
    }
    rule.tag
}

/// A raw value together with its string form, computed once per call.
struct Subject<'a> {
    value: RawValue<'a>,
    text: Option<Cow<'a, str>>,
}

impl<'a> Subject<'a> {
    fn new(value: RawValue<'a>) -> Self {
        Self {
            value,
            text: value.string_form(),
        }
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The string form of a value the date rules may look at.
    fn date_candidate(&self) -> Option<&str> {
        if self.value.is_container() || !self.value.is_truthy() {
            return None;
        }
        self.text()
    }
}

fn date_ok<T>(rule: RuleId, input: &str, result: Result<T, DateParseError>) -> bool {
    match result {
        Ok(_) => true,
        Err(error) => {
            trace!(rule = %rule, input, %error, "date rule rejected input");
            false
        }
    }
}

fn is_sequence(subject: &Subject<'_>) -> bool {
    matches!(subject.value, RawValue::Sequence(_))
}

fn is_mapping(subject: &Subject<'_>) -> bool {
    matches!(subject.value, RawValue::Mapping(_))
}

fn is_boolean(subject: &Subject<'_>) -> bool {
    matches!(subject.value, RawValue::Bool(_))
}

fn is_numeric(subject: &Subject<'_>) -> bool {
    subject.value.is_numeric() || subject.text().is_some_and(is_all_digits)
}

fn is_text(subject: &Subject<'_>) -> bool {
    subject.value.is_text() && !subject.text().is_some_and(is_all_digits)
}

fn is_epoch_like_timestamp(subject: &Subject<'_>) -> bool {
    let Some(text) = subject.date_candidate() else {
        return false;
    };
    let shaped = utf16_len(text) > 9
        && (4..=13).contains(&digit_count(text))
        && (text.starts_with('1') || text.starts_with('2'));
    if !shaped {
        return false;
    }
    let parsed = match subject.value {
        RawValue::Number(n) => time_clip(n),
        RawValue::Bool(b) => time_clip(if b { 1.0 } else { 0.0 }),
        _ => parse_lenient(text),
    };
    date_ok(RuleId::EpochLikeTimestamp, text, parsed)
}

fn is_formatted_date(subject: &Subject<'_>) -> bool {
    let Some(text) = subject.date_candidate() else {
        return false;
    };
    if is_epoch_shaped(text) {
        return false;
    }
    let shape_ok = if subject.value.is_numeric() {
        utf16_len(text) == 10
    } else {
        !is_all_digits(text)
    };
    shape_ok && date_ok(RuleId::FormattedDate, text, match_date_formats(text))
}

fn is_epoch_seconds_text(subject: &Subject<'_>) -> bool {
    let Some(text) = subject.date_candidate() else {
        return false;
    };
    subject.value.is_text()
        && utf16_len(text) == 10
        && is_epoch_shaped(text)
        && date_ok(RuleId::EpochSecondsText, text, parse_epoch_seconds(text))
}

fn is_epoch_seconds_number(subject: &Subject<'_>) -> bool {
    let Some(text) = subject.date_candidate() else {
        return false;
    };
    subject.value.is_numeric()
        && utf16_len(text) == 10
        && text.starts_with('1')
        && date_ok(RuleId::EpochSecondsNumber, text, parse_epoch_seconds(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    // ---- base rules ----

    #[test]
    fn test_containers() {
        let doc = json!({"list": [1, "2023-05-17"], "map": {"a": 1}, "empty": []});
        assert_eq!(classify(&doc["list"]), TypeTag::Array);
        assert_eq!(classify(&doc["empty"]), TypeTag::Array);
        assert_eq!(classify(&doc["map"]), TypeTag::Object);
        assert_eq!(classify(&doc), TypeTag::Object);
    }

    #[test]
    fn test_booleans() {
        assert_eq!(classify(true), TypeTag::Boolean);
        assert_eq!(classify(false), TypeTag::Boolean);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(classify(42_i64), TypeTag::Number);
        assert_eq!(classify(0_i64), TypeTag::Number);
        assert_eq!(classify(-3.5), TypeTag::Number);
        assert_eq!(classify(f64::NAN), TypeTag::Number);
        assert_eq!(classify("42"), TypeTag::Number);
        assert_eq!(classify("007"), TypeTag::Number);
    }

    #[test]
    fn test_strings() {
        assert_eq!(classify("hello"), TypeTag::String);
        assert_eq!(classify(""), TypeTag::String);
        assert_eq!(classify("-42"), TypeTag::String);
        assert_eq!(classify("4.2"), TypeTag::String);
        assert_eq!(classify(" 42"), TypeTag::String);
    }

    #[test]
    fn test_null_and_absent_are_undetermined() {
        assert_eq!(classify(&Value::Null), TypeTag::Undetermined);
        assert_eq!(classify(RawValue::Absent), TypeTag::Undetermined);
        assert_eq!(classify(None::<&Value>), TypeTag::Undetermined);
    }

    // ---- date overrides ----

    #[test]
    fn test_formatted_date_string() {
        let c = explain("2023-05-17");
        assert_eq!(c.tag, TypeTag::Date);
        assert_eq!(c.matched_format, Some("YYYY-MM-DD"));
        assert!(c.fired.contains(&RuleId::Text));
        assert!(c.fired.contains(&RuleId::FormattedDate));
    }

    #[test]
    fn test_epoch_seconds_number() {
        let c = explain(1_684_296_000_i64);
        assert_eq!(c.tag, TypeTag::Date);
        assert_eq!(
            c.fired,
            vec![
                RuleId::Numeric,
                RuleId::EpochLikeTimestamp,
                RuleId::EpochSecondsNumber
            ]
        );
    }

    #[test]
    fn test_epoch_seconds_string_overrides_numeric() {
        let c = explain("1684296000");
        assert_eq!(c.tag, TypeTag::Date);
        assert_eq!(c.fired, vec![RuleId::Numeric, RuleId::EpochSecondsText]);
    }

    #[test]
    fn test_epoch_milliseconds_number() {
        let c = explain(1_684_296_000_123_i64);
        assert_eq!(c.tag, TypeTag::Date);
        assert_eq!(c.fired, vec![RuleId::Numeric, RuleId::EpochLikeTimestamp]);
    }

    #[test]
    fn test_epoch_milliseconds_string_stays_number() {
        assert_eq!(classify("1684296000123"), TypeTag::Number);
    }

    #[test]
    fn test_iso_strings() {
        assert_eq!(classify("2023-05-17T04:00:00Z"), TypeTag::Date);
        assert_eq!(classify("2023-05-17T04:00:00.000Z"), TypeTag::Date);
        assert_eq!(classify("2023-05-17 10:30"), TypeTag::Date);
        assert_eq!(classify("17/05/2023"), TypeTag::Date);
    }

    #[test]
    fn test_free_form_dates_via_lenient_parse() {
        let c = explain("17 May 2023 10:00");
        assert_eq!(c.tag, TypeTag::Date);
        assert_eq!(c.fired, vec![RuleId::Text, RuleId::EpochLikeTimestamp]);
        assert_eq!(c.matched_format, None);
        // Leading letter: only the strict formats could match, and none do.
        assert_eq!(classify("May 17 2023 10:00"), TypeTag::String);
        let c = explain("Wed May 17 2023 06:00:00 GMT+0200 (Central European Summer Time)");
        assert_eq!(c.tag, TypeTag::String);
    }

    #[test]
    fn test_falsy_values_never_dates() {
        assert_eq!(classify(0_i64), TypeTag::Number);
        assert_eq!(classify(""), TypeTag::String);
        assert_eq!(classify(false), TypeTag::Boolean);
    }

    #[test]
    fn test_short_numbers_are_not_dates() {
        assert_eq!(classify(2023_i64), TypeTag::Number);
        assert_eq!(classify(168_429_600_i64), TypeTag::Number);
        assert_eq!(classify("2023"), TypeTag::Number);
    }

    #[test]
    fn test_fourteen_digit_number_is_not_a_date() {
        assert_eq!(classify(16_842_960_001_234_i64), TypeTag::Number);
    }

    #[test]
    fn test_ten_digit_number_starting_with_nine_is_not_a_date() {
        assert_eq!(classify(9_876_543_210_i64), TypeTag::Number);
    }

    #[test]
    fn test_ten_digit_string_starting_with_nine_is_a_date() {
        // Rule 6c has no leading-digit guard.
        assert_eq!(classify("9876543210"), TypeTag::Date);
    }

    #[test]
    fn test_non_date_strings_stay_strings() {
        assert_eq!(classify("hello world"), TypeTag::String);
        assert_eq!(classify("abc-12345678"), TypeTag::String);
    }

    #[test]
    fn test_rule_matches_single_rule() {
        let formatted = RULES.iter().find(|r| r.id == RuleId::FormattedDate).unwrap();
        assert!(formatted.matches(RawValue::Text("2023-05-17")));
        assert!(!formatted.matches(RawValue::Text("1684296000")));
        assert!(!formatted.matches(RawValue::Null));
    }

    #[test]
    fn test_rule_table_order() {
        let ids: Vec<_> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                RuleId::Sequence,
                RuleId::Mapping,
                RuleId::Boolean,
                RuleId::Numeric,
                RuleId::Text,
                RuleId::EpochLikeTimestamp,
                RuleId::FormattedDate,
                RuleId::EpochSecondsText,
                RuleId::EpochSecondsNumber,
            ]
        );
        let first_override = RULES.iter().position(|r| r.phase == Phase::Override).unwrap();
        assert!(RULES[first_override..].iter().all(|r| r.phase == Phase::Override));
        assert!(RULES[first_override..].iter().all(|r| r.tag == TypeTag::Date));
    }

    // ---- properties ----

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            any::<f64>()
                .prop_filter("finite", |f| f.is_finite())
                .prop_map(|f| json!(f)),
            ".*".prop_map(Value::String),
            "[0-9]{1,16}".prop_map(Value::String),
            "[0-9]{4}-[0-9]{2}-[0-9]{2}( [0-9]{2}:[0-9]{2})?".prop_map(Value::String),
        ]
    }

    fn json_value() -> impl Strategy<Value = Value> {
        scalar().prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(|m| {
                    let map: serde_json::Map<String, Value> = m.into_iter().collect();
                    Value::Object(map)
                }),
            ]
        })
    }

    proptest! {
        /// Every sequence is an array, whatever it holds.
        #[test]
        fn sequences_are_arrays(items in prop::collection::vec(json_value(), 0..6)) {
            prop_assert_eq!(classify(&Value::Array(items)), TypeTag::Array);
        }

        /// Classification is deterministic.
        #[test]
        fn classify_is_idempotent(value in json_value()) {
            prop_assert_eq!(classify(&value), classify(&value));
        }

        /// `explain` agrees with `classify`.
        #[test]
        fn explain_agrees_with_classify(value in json_value()) {
            prop_assert_eq!(explain(&value).tag, classify(&value));
        }

        /// Arbitrary text is always some determined tag.
        #[test]
        fn text_is_always_determined(s in ".*") {
            prop_assert!(classify(s.as_str()).is_determined());
        }

        /// Arbitrary numbers are `number` or `date`.
        #[test]
        fn numbers_are_number_or_date(n in any::<f64>()) {
            let tag = classify(n);
            prop_assert!(tag == TypeTag::Number || tag == TypeTag::Date);
        }
    }
}
