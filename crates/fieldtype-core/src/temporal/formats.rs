//! # Strict Date Formats
//!
//! Textual date detection is driven by a fixed, ordered list of patterns,
//! [`DATE_FORMATS`]. An input matches a pattern only if every pattern token
//! consumes input in order, the whole input is consumed, and the resulting
//! calendar fields are in range. The first matching pattern wins.
//!
//! ## Pattern tokens
//!
//! | Token | Accepts |
//! |-------|---------|
//! | `YYYY` | exactly four ASCII digits |
//! | `MM` `DD` `HH` `mm` `ss` | exactly two ASCII digits |
//! | `SSS` | exactly three ASCII digits |
//! | `Z` `ZZ` | `Z` (any case), or `±HH`, `±HHmm`, `±HH:mm` |
//! | `MMM` | English short month name, case-insensitive |
//! | `ddd` | English short weekday name, case-insensitive; must match the date |
//! | `[...]` | the bracketed text literally |
//! | anything else | itself, literally (`zz` included: it has no parse rule) |
//!
//! Hour `24` is accepted only as `24:00:00.000` and rolls over to the next day.

use chrono::{Datelike, NaiveDate};

use crate::error::DateParseError;
use crate::temporal::make_time_value;

/// One entry of the date format list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateFormat {
    pattern: &'static str,
}

/// Textual date formats, in match order. The duplicated ISO entry is kept:
/// the list order is part of the contract.
pub const DATE_FORMATS: &[DateFormat] = &[
    DateFormat::new("YYYY-MM-DD"),
    DateFormat::new("MM-DD-YYYY"),
    DateFormat::new("DD-MM-YYYY"),
    DateFormat::new("YYYY/MM/DD"),
    DateFormat::new("MM/DD/YYYY"),
    DateFormat::new("DD/MM/YYYY"),
    DateFormat::new("YYYY-MM-DD HH:mm"),
    DateFormat::new("MM-DD-YYYY HH:mm"),
    DateFormat::new("DD-MM-YYYY HH:mm"),
    DateFormat::new("YYYY/MM/DD HH:mm"),
    DateFormat::new("MM/DD/YYYY HH:mm"),
    DateFormat::new("DD/MM/YYYY HH:mm"),
    DateFormat::new("YYYY-MM-DD HH:mm:ss"),
    DateFormat::new("MM-DD-YYYY HH:mm:ss"),
    DateFormat::new("DD-MM-YYYY HH:mm:ss"),
    DateFormat::new("YYYY/MM/DD HH:mm:ss"),
    DateFormat::new("MM/DD/YYYY HH:mm:ss"),
    DateFormat::new("DD/MM/YYYY HH:mm:ss"),
    DateFormat::new("YYYY-MM-DDTHH:mm:ssZ"),
    DateFormat::new("YYYY-MM-DDTHH:mm:ss.SSSZ"),
    DateFormat::new("YYYY-MM-DDTHH:mm:ss.SSS[Z]"),
    DateFormat::new("YYYY-MM-DDTHH:mm:ss.SSSZ"),
    DateFormat::new("ddd MMM DD YYYY HH:mm:ss [GMT]ZZ (zz)"),
];

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const WEEKDAYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

impl DateFormat {
    /// Wrap a pattern string.
    pub const fn new(pattern: &'static str) -> Self {
        Self { pattern }
    }

    /// The pattern as written.
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Strictly parse `input` against this format.
    ///
    /// # Errors
    ///
    /// Returns [`DateParseError::Syntax`] when a token does not match or input
    /// is left over, [`DateParseError::FieldRange`] for out-of-range fields,
    /// and [`DateParseError::WeekdayMismatch`] when a named weekday disagrees
    /// with the date.
    pub fn parse(&self, input: &str) -> Result<f64, DateParseError> {
        parse_strict(input, self.pattern)
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.pattern)
    }
}

/// Return the first format in [`DATE_FORMATS`] that strictly matches `input`.
///
/// # Errors
///
/// Returns [`DateParseError::NoFormatMatched`] when no format matches.
pub fn match_date_formats(input: &str) -> Result<&'static DateFormat, DateParseError> {
    DATE_FORMATS
        .iter()
        .find(|format| format.parse(input).is_ok())
        .ok_or_else(|| DateParseError::NoFormatMatched {
            input: input.to_string(),
            tried: DATE_FORMATS.len(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormatToken {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Offset,
    MonthName,
    WeekdayName,
    Literal(String),
}

/// Split a pattern into tokens, longest token first.
fn tokenize(pattern: &str) -> Vec<FormatToken> {
    const NAMED: &[(&str, FormatToken)] = &[
        ("YYYY", FormatToken::Year),
        ("MMM", FormatToken::MonthName),
        ("MM", FormatToken::Month),
        ("DD", FormatToken::Day),
        ("ddd", FormatToken::WeekdayName),
        ("HH", FormatToken::Hour),
        ("mm", FormatToken::Minute),
        ("ss", FormatToken::Second),
        ("SSS", FormatToken::Millisecond),
        ("ZZ", FormatToken::Offset),
        ("Z", FormatToken::Offset),
    ];

    let mut tokens = Vec::new();
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                tokens.push(FormatToken::Literal(rest[1..end].to_string()));
                rest = &rest[end + 1..];
                continue;
            }
        }
        if rest.starts_with("zz") {
            tokens.push(FormatToken::Literal("zz".to_string()));
            rest = &rest[2..];
            continue;
        }
        if let Some((name, token)) = NAMED.iter().find(|(name, _)| rest.starts_with(name)) {
            tokens.push(token.clone());
            rest = &rest[name.len()..];
            continue;
        }
        tokens.push(FormatToken::Literal(c.to_string()));
        rest = &rest[c.len_utf8()..];
    }
    tokens
}

#[derive(Debug, Default)]
struct Fields {
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
    offset_minutes: i64,
    weekday: Option<u32>,
}

/// Strictly parse `input` against a raw pattern string.
///
/// # Errors
///
/// See [`DateFormat::parse`].
pub fn parse_strict(input: &str, pattern: &str) -> Result<f64, DateParseError> {
    let mut fields = Fields {
        month: 1,
        day: 1,
        ..Fields::default()
    };
    let mut pos = 0;

    for token in tokenize(pattern) {
        let rest = &input[pos..];
        let consumed = match token {
            FormatToken::Year => read_digits(rest, 4).map(|(v, n)| {
                fields.year = v;
                n
            }),
            FormatToken::Month => read_digits(rest, 2).map(|(v, n)| {
                fields.month = v;
                n
            }),
            FormatToken::Day => read_digits(rest, 2).map(|(v, n)| {
                fields.day = v;
                n
            }),
            FormatToken::Hour => read_digits(rest, 2).map(|(v, n)| {
                fields.hour = v;
                n
            }),
            FormatToken::Minute => read_digits(rest, 2).map(|(v, n)| {
                fields.minute = v;
                n
            }),
            FormatToken::Second => read_digits(rest, 2).map(|(v, n)| {
                fields.second = v;
                n
            }),
            FormatToken::Millisecond => read_digits(rest, 3).map(|(v, n)| {
                fields.millisecond = v;
                n
            }),
            FormatToken::Offset => read_offset(rest).map(|(v, n)| {
                fields.offset_minutes = v;
                n
            }),
            FormatToken::MonthName => read_name(rest, &MONTHS).map(|(i, n)| {
                fields.month = i as i64 + 1;
                n
            }),
            FormatToken::WeekdayName => read_name(rest, &WEEKDAYS).map(|(i, n)| {
                fields.weekday = Some(i as u32);
                n
            }),
            FormatToken::Literal(ref text) => rest.starts_with(text.as_str()).then_some(text.len()),
        };
        match consumed {
            Some(n) => pos += n,
            None => return Err(DateParseError::syntax(input, pos)),
        }
    }

    if pos != input.len() {
        return Err(DateParseError::syntax(input, pos));
    }

    validate(&fields)?;
    make_time_value(
        fields.year,
        fields.month,
        fields.day,
        [fields.hour, fields.minute, fields.second, fields.millisecond],
        fields.offset_minutes,
    )
}

fn validate(fields: &Fields) -> Result<(), DateParseError> {
    if !(1..=12).contains(&fields.month) {
        return Err(DateParseError::FieldRange {
            field: "month",
            value: fields.month,
        });
    }
    let date = i32::try_from(fields.year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, fields.month as u32, fields.day as u32))
        .ok_or(DateParseError::FieldRange {
            field: "day",
            value: fields.day,
        })?;

    let end_of_day =
        fields.hour == 24 && fields.minute == 0 && fields.second == 0 && fields.millisecond == 0;
    if fields.hour > 23 && !end_of_day {
        return Err(DateParseError::FieldRange {
            field: "hour",
            value: fields.hour,
        });
    }
    if fields.minute > 59 {
        return Err(DateParseError::FieldRange {
            field: "minute",
            value: fields.minute,
        });
    }
    if fields.second > 59 {
        return Err(DateParseError::FieldRange {
            field: "second",
            value: fields.second,
        });
    }

    if let Some(weekday) = fields.weekday {
        if date.weekday().num_days_from_sunday() != weekday {
            return Err(DateParseError::WeekdayMismatch {
                date: date.to_string(),
            });
        }
    }
    Ok(())
}

/// Exactly `count` ASCII digits at the start of `s`.
fn read_digits(s: &str, count: usize) -> Option<(i64, usize)> {
    let digits = s.get(..count)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|v| (v, count))
}

/// `Z`/`z`, or `±HH` optionally followed by `mm` or `:mm`. Returns minutes
/// east of UTC.
fn read_offset(s: &str) -> Option<(i64, usize)> {
    let bytes = s.as_bytes();
    match bytes.first()? {
        b'Z' | b'z' => return Some((0, 1)),
        b'+' | b'-' => {}
        _ => return None,
    }
    let sign = if bytes[0] == b'-' { -1 } else { 1 };
    let (hours, _) = read_digits(&s[1..], 2)?;
    let mut len = 3;
    let mut minutes = 0;
    let tail = &s[3..];
    if let Some((m, _)) = read_digits(tail, 2) {
        minutes = m;
        len += 2;
    } else if let Some((m, _)) = tail.strip_prefix(':').and_then(|t| read_digits(t, 2)) {
        minutes = m;
        len += 3;
    }
    Some((sign * (hours * 60 + minutes), len))
}

/// A three-letter English name from `names`, case-insensitive.
fn read_name(s: &str, names: &[&str]) -> Option<(usize, usize)> {
    let candidate = s.get(..3)?.to_ascii_lowercase();
    names
        .iter()
        .position(|name| *name == candidate)
        .map(|index| (index, 3))
}
