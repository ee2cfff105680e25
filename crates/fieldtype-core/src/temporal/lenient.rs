//! # Lenient Timestamp Parsing
//!
//! Accepts timestamp strings the way a browser `Date` constructor does, so a
//! column that renders as a date in a dashboard also classifies as one here.
//!
//! Parsing happens in two stages over one token stream:
//!
//! 1. **ISO date-time**: `[+-]YYYYYY|YYYY[-MM[-DD]]` optionally followed by
//!    `THH:mm[:ss[.fff]]` and `Z`/`±HH:mm`/`±HHmm`. Date-only forms are UTC.
//! 2. **Legacy fallback**: if stage 1 stops early, the remaining tokens feed
//!    three composers (day, time, UTC offset) with the classic free-form
//!    rules: `May 17 2023`, `5/17/2023 10:00 PM`, `17 May 2023 GMT+0200`,
//!    `Wed May 17 2023 12:00:00 GMT+0200 (Central European Summer Time)`.
//!
//! ## Tokens
//!
//! | Token | Source |
//! |-------|--------|
//! | number | run of ASCII digits; value keeps the first 9 significant digits |
//! | symbol | one of `:` `-` `+` `.` `)` |
//! | word | run of characters `>= 'A'`; only the first three letters are significant |
//! | whitespace | one whitespace character |
//! | unknown | a parenthesised comment, or any other single character |
//!
//! Words are looked up in a small keyword table (month names, `am`/`pm`,
//! US zone abbreviations, `t`). Any other word is "garbage": tolerated before
//! the first number, fatal after it.

use crate::error::DateParseError;
use crate::temporal::make_time_value;

/// Parse a free-form timestamp string into milliseconds since the epoch.
///
/// # Errors
///
/// Returns a [`DateParseError`] when the string cannot be composed into a
/// calendar date, a field is out of range, or the instant lies outside
/// ±8.64e15 ms.
pub fn parse_lenient(input: &str) -> Result<f64, DateParseError> {
    let mut scanner = Scanner::new(input);
    let mut day = DayComposer::default();
    let mut time = TimeComposer::default();
    let mut tz = ZoneComposer::default();

    let first = match parse_iso(&mut scanner, &mut day, &mut time, &mut tz) {
        IsoOutcome::Complete => Token::End,
        IsoOutcome::Continue(token) => token,
        IsoOutcome::Invalid => return Err(scanner.reject()),
    };

    parse_legacy(first, &mut scanner, &mut day, &mut time, &mut tz)?;

    let (year, month, date) = day.write()?;
    let clock = time.write()?;
    let offset = tz.write()?.unwrap_or(0);
    make_time_value(year, month, date, clock, offset)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

const MAX_SIGNIFICANT_DIGITS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Month(i64),
    AmPm(i64),
    Zone(i64),
    TimeSeparator,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number { value: i64, len: usize },
    Symbol(char),
    Word { keyword: Keyword, len: usize },
    WhiteSpace,
    Unknown,
    End,
}

impl Token {
    fn is_number(&self) -> bool {
        matches!(self, Self::Number { .. })
    }

    fn is_fixed_length_number(&self, n: usize) -> bool {
        matches!(self, Self::Number { len, .. } if *len == n)
    }

    fn number(&self) -> i64 {
        match self {
            Self::Number { value, .. } => *value,
            _ => 0,
        }
    }

    fn is_symbol(&self, c: char) -> bool {
        *self == Self::Symbol(c)
    }

    fn sign(&self) -> Option<i64> {
        match self {
            Self::Symbol('+') => Some(1),
            Self::Symbol('-') => Some(-1),
            _ => None,
        }
    }

    fn is_keyword_z(&self) -> bool {
        matches!(self, Self::Word { keyword: Keyword::Zone(0), len: 1 })
    }
}

/// `(prefix, keyword)`; a prefix shorter than three letters must match the
/// whole word, only month names may be longer than their prefix.
const KEYWORDS: &[(&str, Keyword)] = &[
    ("jan", Keyword::Month(1)),
    ("feb", Keyword::Month(2)),
    ("mar", Keyword::Month(3)),
    ("apr", Keyword::Month(4)),
    ("may", Keyword::Month(5)),
    ("jun", Keyword::Month(6)),
    ("jul", Keyword::Month(7)),
    ("aug", Keyword::Month(8)),
    ("sep", Keyword::Month(9)),
    ("oct", Keyword::Month(10)),
    ("nov", Keyword::Month(11)),
    ("dec", Keyword::Month(12)),
    ("am", Keyword::AmPm(0)),
    ("pm", Keyword::AmPm(12)),
    ("ut", Keyword::Zone(0)),
    ("utc", Keyword::Zone(0)),
    ("z", Keyword::Zone(0)),
    ("gmt", Keyword::Zone(0)),
    ("cdt", Keyword::Zone(-5)),
    ("cst", Keyword::Zone(-6)),
    ("edt", Keyword::Zone(-4)),
    ("est", Keyword::Zone(-5)),
    ("mdt", Keyword::Zone(-6)),
    ("mst", Keyword::Zone(-7)),
    ("pdt", Keyword::Zone(-7)),
    ("pst", Keyword::Zone(-8)),
    ("t", Keyword::TimeSeparator),
];

fn lookup_keyword(prefix: &str, len: usize) -> Keyword {
    KEYWORDS
        .iter()
        .find(|(name, keyword)| {
            *name == prefix && (len <= 3 || matches!(keyword, Keyword::Month(_)))
        })
        .map_or(Keyword::Other, |(_, keyword)| *keyword)
}

fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn is_word_char(c: char) -> bool {
    c >= 'A' && !is_space(c)
}

/// Single-token lookahead tokenizer.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    peeked: Token,
    peeked_at: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let mut scanner = Self {
            input,
            pos: 0,
            peeked: Token::End,
            peeked_at: 0,
        };
        scanner.peeked = scanner.scan();
        scanner
    }

    /// Syntax error pointing at the lookahead token.
    fn reject(&self) -> DateParseError {
        DateParseError::syntax(self.input, self.peeked_at)
    }

    fn peek(&self) -> Token {
        self.peeked
    }

    fn next(&mut self) -> Token {
        let token = self.peeked;
        self.peeked_at = self.pos;
        self.peeked = self.scan();
        token
    }

    fn skip_symbol(&mut self, c: char) -> bool {
        if self.peeked.is_symbol(c) {
            self.next();
            true
        } else {
            false
        }
    }

    fn scan(&mut self) -> Token {
        let rest = &self.input[self.pos..];
        let Some(c) = rest.chars().next() else {
            return Token::End;
        };

        if c.is_ascii_digit() {
            let len = rest.bytes().take_while(u8::is_ascii_digit).count();
            let value = rest[..len]
                .trim_start_matches('0')
                .bytes()
                .take(MAX_SIGNIFICANT_DIGITS)
                .fold(0_i64, |acc, b| acc * 10 + i64::from(b - b'0'));
            self.pos += len;
            return Token::Number { value, len };
        }

        if matches!(c, ':' | '-' | '+' | '.' | ')') {
            self.pos += 1;
            return Token::Symbol(c);
        }

        if is_word_char(c) {
            let word: String = rest.chars().take_while(|c| is_word_char(*c)).collect();
            self.pos += word.len();
            let len = word.chars().map(char::len_utf16).sum::<usize>();
            let prefix: String = word.chars().take(3).map(|c| c.to_ascii_lowercase()).collect();
            return Token::Word {
                keyword: lookup_keyword(&prefix, len),
                len,
            };
        }

        if is_space(c) {
            self.pos += c.len_utf8();
            return Token::WhiteSpace;
        }

        if c == '(' {
            let mut balance = 0_usize;
            for (i, ch) in rest.char_indices() {
                match ch {
                    '(' => balance += 1,
                    ')' => balance = balance.saturating_sub(1),
                    _ => {}
                }
                if balance == 0 {
                    self.pos += i + ch.len_utf8();
                    return Token::Unknown;
                }
            }
            self.pos = self.input.len();
            return Token::Unknown;
        }

        self.pos += c.len_utf8();
        Token::Unknown
    }
}

// ---------------------------------------------------------------------------
// Composers
// ---------------------------------------------------------------------------

fn is_month(n: i64) -> bool {
    (1..=12).contains(&n)
}

fn is_day(n: i64) -> bool {
    (1..=31).contains(&n)
}

fn is_hour(n: i64) -> bool {
    (0..=23).contains(&n)
}

fn is_hour12(n: i64) -> bool {
    (0..=12).contains(&n)
}

fn is_minute(n: i64) -> bool {
    (0..=59).contains(&n)
}

fn is_second(n: i64) -> bool {
    (0..=59).contains(&n)
}

fn is_millisecond(n: i64) -> bool {
    (0..=999).contains(&n)
}

/// Collects up to three unnamed date numbers and an optional month name.
#[derive(Debug, Default)]
struct DayComposer {
    comp: [i64; 3],
    index: usize,
    named_month: Option<i64>,
    iso: bool,
}

impl DayComposer {
    fn add(&mut self, n: i64) -> bool {
        if self.index == self.comp.len() {
            return false;
        }
        self.comp[self.index] = n;
        self.index += 1;
        true
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }

    fn write(&mut self) -> Result<(i64, i64, i64), DateParseError> {
        if self.index < 1 {
            return Err(DateParseError::FieldRange {
                field: "day",
                value: 0,
            });
        }
        while self.index < self.comp.len() {
            self.comp[self.index] = 1;
            self.index += 1;
        }
        let [a, b, c] = self.comp;

        let (mut year, month, day) = match self.named_month {
            None if self.iso || !is_day(a) => (a, b, c),
            None => (c, a, b),
            Some(month) if !is_day(a) => (a, month, b),
            Some(month) => (b, month, a),
        };

        if !self.iso {
            if (0..=49).contains(&year) {
                year += 2000;
            } else if (50..=99).contains(&year) {
                year += 1900;
            }
        }

        if !is_month(month) {
            return Err(DateParseError::FieldRange {
                field: "month",
                value: month,
            });
        }
        if !is_day(day) {
            return Err(DateParseError::FieldRange {
                field: "day",
                value: day,
            });
        }
        Ok((year, month, day))
    }
}

/// Collects hour, minute, second and millisecond.
#[derive(Debug, Default)]
struct TimeComposer {
    comp: [i64; 4],
    index: usize,
    hour_offset: Option<i64>,
}

impl TimeComposer {
    fn add(&mut self, n: i64) -> bool {
        if self.index == self.comp.len() {
            return false;
        }
        self.comp[self.index] = n;
        self.index += 1;
        true
    }

    fn add_final(&mut self, n: i64) -> bool {
        if !self.add(n) {
            return false;
        }
        while self.index < self.comp.len() {
            self.comp[self.index] = 0;
            self.index += 1;
        }
        true
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }

    fn is_expecting(&self, n: i64) -> bool {
        (self.index == 1 && is_minute(n))
            || (self.index == 2 && is_second(n))
            || (self.index == 3 && is_millisecond(n))
    }

    fn write(&mut self) -> Result<[i64; 4], DateParseError> {
        while self.index < self.comp.len() {
            self.comp[self.index] = 0;
            self.index += 1;
        }
        let [mut hour, minute, second, millisecond] = self.comp;

        if let Some(offset) = self.hour_offset {
            if !is_hour12(hour) {
                return Err(DateParseError::FieldRange {
                    field: "hour",
                    value: hour,
                });
            }
            hour = hour % 12 + offset;
        }

        let in_range =
            is_hour(hour) && is_minute(minute) && is_second(second) && is_millisecond(millisecond);
        let end_of_day = hour == 24 && minute == 0 && second == 0 && millisecond == 0;
        if !in_range && !end_of_day {
            return Err(DateParseError::FieldRange {
                field: "time",
                value: hour,
            });
        }
        Ok([hour, minute, second, millisecond])
    }
}

/// Collects an explicit UTC offset.
#[derive(Debug, Default)]
struct ZoneComposer {
    sign: Option<i64>,
    hour: Option<i64>,
    minute: Option<i64>,
}

const MAX_OFFSET_SECONDS: i64 = (1 << 30) - 1;

impl ZoneComposer {
    fn set(&mut self, offset_hours: i64) {
        let sign = if offset_hours < 0 { -1 } else { 1 };
        self.sign = Some(sign);
        self.hour = Some(offset_hours * sign);
        self.minute = Some(0);
    }

    fn is_expecting(&self, n: i64) -> bool {
        self.hour.is_some() && self.minute.is_none() && is_minute(n)
    }

    fn is_utc(&self) -> bool {
        self.hour == Some(0) && self.minute == Some(0)
    }

    fn is_empty(&self) -> bool {
        self.hour.is_none()
    }

    /// Offset in minutes east of UTC, or `None` for local (unspecified) time.
    fn write(&self) -> Result<Option<i64>, DateParseError> {
        let Some(sign) = self.sign else {
            return Ok(None);
        };
        let hour = self.hour.unwrap_or(0);
        let minute = self.minute.unwrap_or(0);
        let total_seconds = hour * 3600 + minute * 60;
        if total_seconds > MAX_OFFSET_SECONDS {
            return Err(DateParseError::FieldRange {
                field: "utc offset",
                value: total_seconds,
            });
        }
        Ok(Some(sign * (hour * 60 + minute)))
    }
}

/// First three significant digits of a fraction, scaled to milliseconds.
fn read_milliseconds(token: Token) -> i64 {
    let (mut value, mut len) = match token {
        Token::Number { value, len } => (value, len),
        _ => return 0,
    };
    match len {
        1 => value * 100,
        2 => value * 10,
        3 => value,
        _ => {
            len = len.min(MAX_SIGNIFICANT_DIGITS);
            while len > 3 {
                value /= 10;
                len -= 1;
            }
            value
        }
    }
}

// ---------------------------------------------------------------------------
// Stage 1: ISO date-time
// ---------------------------------------------------------------------------

enum IsoOutcome {
    /// The whole input was an ISO date-time.
    Complete,
    /// Stage 1 stopped at this (already consumed) token.
    Continue(Token),
    /// The input started as an ISO date-time but broke its grammar.
    Invalid,
}

fn parse_iso(
    scanner: &mut Scanner<'_>,
    day: &mut DayComposer,
    time: &mut TimeComposer,
    tz: &mut ZoneComposer,
) -> IsoOutcome {
    if scanner.peek().sign().is_some() {
        let sign_token = scanner.next();
        if !scanner.peek().is_fixed_length_number(6) {
            return IsoOutcome::Continue(sign_token);
        }
        let sign = sign_token.sign().unwrap_or(1);
        let year = scanner.next().number();
        if sign < 0 && year == 0 {
            return IsoOutcome::Continue(sign_token);
        }
        day.add(sign * year);
    } else if scanner.peek().is_fixed_length_number(4) {
        day.add(scanner.next().number());
    } else {
        return IsoOutcome::Continue(scanner.next());
    }

    if scanner.skip_symbol('-') {
        let peek = scanner.peek();
        if !peek.is_fixed_length_number(2) || !is_month(peek.number()) {
            return IsoOutcome::Continue(scanner.next());
        }
        day.add(scanner.next().number());
        if scanner.skip_symbol('-') {
            let peek = scanner.peek();
            if !peek.is_fixed_length_number(2) || !is_day(peek.number()) {
                return IsoOutcome::Continue(scanner.next());
            }
            day.add(scanner.next().number());
        }
    }

    if !matches!(
        scanner.peek(),
        Token::Word {
            keyword: Keyword::TimeSeparator,
            ..
        }
    ) {
        if scanner.peek() != Token::End {
            return IsoOutcome::Continue(scanner.next());
        }
    } else if !parse_iso_time(scanner, time, tz) {
        return IsoOutcome::Invalid;
    }

    if tz.is_empty() && time.is_empty() {
        tz.set(0);
    }
    day.iso = true;
    IsoOutcome::Complete
}

/// `THH:mm[:ss[.fff]][Z|±HH:mm|±HHmm]` followed by end of input.
fn parse_iso_time(scanner: &mut Scanner<'_>, time: &mut TimeComposer, tz: &mut ZoneComposer) -> bool {
    scanner.next();

    let peek = scanner.peek();
    if !peek.is_fixed_length_number(2) || !(0..=24).contains(&peek.number()) {
        return false;
    }
    let hour_is_24 = peek.number() == 24;
    time.add(scanner.next().number());

    if !scanner.skip_symbol(':') {
        return false;
    }
    let peek = scanner.peek();
    if !peek.is_fixed_length_number(2) || !is_minute(peek.number()) || (hour_is_24 && peek.number() > 0) {
        return false;
    }
    time.add(scanner.next().number());

    if scanner.skip_symbol(':') {
        let peek = scanner.peek();
        if !peek.is_fixed_length_number(2) || !is_second(peek.number()) || (hour_is_24 && peek.number() > 0) {
            return false;
        }
        time.add(scanner.next().number());

        if scanner.skip_symbol('.') {
            let peek = scanner.peek();
            if !peek.is_number() || (hour_is_24 && peek.number() > 0) {
                return false;
            }
            time.add(read_milliseconds(scanner.next()));
        }
    }

    if scanner.peek().is_keyword_z() {
        scanner.next();
        tz.set(0);
    } else if let Some(sign) = scanner.peek().sign() {
        scanner.next();
        tz.sign = Some(sign);
        if scanner.peek().is_fixed_length_number(4) {
            let hourmin = scanner.next().number();
            let (hour, minute) = (hourmin / 100, hourmin % 100);
            if !is_hour(hour) || !is_minute(minute) {
                return false;
            }
            tz.hour = Some(hour);
            tz.minute = Some(minute);
        } else {
            let peek = scanner.peek();
            if !peek.is_fixed_length_number(2) || !is_hour(peek.number()) {
                return false;
            }
            tz.hour = Some(scanner.next().number());
            if !scanner.skip_symbol(':') {
                return false;
            }
            let peek = scanner.peek();
            if !peek.is_fixed_length_number(2) || !is_minute(peek.number()) {
                return false;
            }
            tz.minute = Some(scanner.next().number());
        }
    }

    scanner.peek() == Token::End
}

// ---------------------------------------------------------------------------
// Stage 2: legacy free-form
// ---------------------------------------------------------------------------

fn parse_legacy(
    first: Token,
    scanner: &mut Scanner<'_>,
    day: &mut DayComposer,
    time: &mut TimeComposer,
    tz: &mut ZoneComposer,
) -> Result<(), DateParseError> {
    let mut has_read_number = !day.is_empty();
    let mut token = first;

    while token != Token::End {
        match token {
            Token::Number { value: n, .. } => {
                has_read_number = true;
                if scanner.skip_symbol(':') {
                    if scanner.skip_symbol(':') {
                        if !time.is_empty() {
                            return Err(scanner.reject());
                        }
                        time.add(n);
                        time.add(0);
                    } else {
                        if !time.add(n) {
                            return Err(scanner.reject());
                        }
                        if scanner.peek().is_symbol('.') {
                            scanner.next();
                        }
                    }
                } else if scanner.skip_symbol('.') && time.is_expecting(n) {
                    time.add(n);
                    if !scanner.peek().is_number() {
                        return Err(scanner.reject());
                    }
                    time.add_final(read_milliseconds(scanner.next()));
                } else if tz.is_expecting(n) {
                    tz.minute = Some(n);
                } else if time.is_expecting(n) {
                    time.add_final(n);
                    let peek = scanner.peek();
                    let terminated = matches!(peek, Token::End | Token::WhiteSpace)
                        || peek.is_keyword_z()
                        || peek.sign().is_some();
                    if !terminated {
                        return Err(scanner.reject());
                    }
                } else {
                    if !day.add(n) {
                        return Err(scanner.reject());
                    }
                    scanner.skip_symbol('-');
                }
            }
            Token::Word { keyword, .. } => match keyword {
                Keyword::AmPm(offset) if !time.is_empty() => time.hour_offset = Some(offset),
                Keyword::Month(month) => {
                    day.named_month = Some(month);
                    scanner.skip_symbol('-');
                }
                Keyword::Zone(hours) if has_read_number => tz.set(hours),
                _ => {
                    if has_read_number || scanner.peek().is_number() {
                        return Err(scanner.reject());
                    }
                }
            },
            Token::Symbol(_) if token.sign().is_some() && (tz.is_utc() || !time.is_empty()) => {
                tz.sign = token.sign();
                let (n, len) = match scanner.peek() {
                    Token::Number { value, len } => {
                        scanner.next();
                        (value, len)
                    }
                    _ => (0, 0),
                };
                has_read_number = true;
                if scanner.peek().is_symbol(':') {
                    tz.hour = Some(n);
                    tz.minute = None;
                } else if len == 1 || len == 2 {
                    tz.hour = Some(n);
                    tz.minute = Some(0);
                } else if len == 3 || len == 4 {
                    tz.hour = Some(n / 100);
                    tz.minute = Some(n % 100);
                } else {
                    return Err(scanner.reject());
                }
            }
            Token::Symbol(c) if (c == '+' || c == '-' || c == ')') && has_read_number => {
                return Err(scanner.reject());
            }
            _ => {}
        }
        token = scanner.next();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: f64 = 86_400_000.0;
    const MAY_17_2023: f64 = 19_494.0 * DAY;

    fn ok(input: &str) -> f64 {
        parse_lenient(input).unwrap_or_else(|e| panic!("{input:?} should parse: {e}"))
    }

    // ---- ISO ----

    #[test]
    fn test_iso_date_only_is_utc_midnight() {
        assert_eq!(ok("2023-05-17"), MAY_17_2023);
        assert_eq!(ok("2023-05"), 19_478.0 * DAY);
        assert_eq!(ok("1970"), 0.0);
    }

    #[test]
    fn test_iso_date_time_with_zone() {
        assert_eq!(ok("2023-05-17T04:00:00Z"), 1_684_296_000_000.0);
        assert_eq!(ok("2023-05-17T06:00:00+02:00"), 1_684_296_000_000.0);
        assert_eq!(ok("2023-05-17T06:00:00+0200"), 1_684_296_000_000.0);
        assert_eq!(ok("2023-05-17T04:00:00.123Z"), 1_684_296_000_123.0);
        assert_eq!(ok("2023-05-17T04:00:00.1Z"), 1_684_296_000_100.0);
        assert_eq!(ok("2023-05-17T04:00:00.123456Z"), 1_684_296_000_123.0);
    }

    #[test]
    fn test_iso_expanded_year() {
        assert_eq!(ok("+002023-05-17"), MAY_17_2023);
        assert!(ok("-000001-01-01") < 0.0);
    }

    #[test]
    fn test_iso_hour_24_only_at_midnight() {
        assert_eq!(ok("2023-05-16T24:00:00Z"), MAY_17_2023);
        assert!(parse_lenient("2023-05-16T24:01:00Z").is_err());
    }

    #[test]
    fn test_iso_time_grammar_violations_are_invalid() {
        assert!(parse_lenient("2023-05-17T4:00").is_err());
        assert!(parse_lenient("2023-05-17T04:00:00Q").is_err());
        assert!(parse_lenient("2023-05-17T04").is_err());
    }

    // ---- legacy ----

    #[test]
    fn test_legacy_date_with_space_separated_time() {
        assert_eq!(ok("2023-05-17 04:00"), 1_684_296_000_000.0);
        assert_eq!(ok("2023-05-17 04:00:00"), 1_684_296_000_000.0);
    }

    #[test]
    fn test_legacy_slash_dates() {
        assert_eq!(ok("2023/05/17"), MAY_17_2023);
        assert_eq!(ok("05/17/2023"), MAY_17_2023);
        assert!(parse_lenient("17/05/2023").is_err());
    }

    #[test]
    fn test_legacy_named_month() {
        assert_eq!(ok("May 17 2023"), MAY_17_2023);
        assert_eq!(ok("17 May 2023"), MAY_17_2023);
        assert_eq!(ok("17-May-2023"), MAY_17_2023);
        assert_eq!(ok("Wed, 17 May 2023 04:00:00 GMT"), 1_684_296_000_000.0);
    }

    #[test]
    fn test_legacy_browser_to_string_output() {
        let s = "Wed May 17 2023 06:00:00 GMT+0200 (Central European Summer Time)";
        assert_eq!(ok(s), 1_684_296_000_000.0);
    }

    #[test]
    fn test_legacy_am_pm() {
        assert_eq!(ok("5/17/2023 4:00 AM"), 1_684_296_000_000.0);
        assert_eq!(ok("5/17/2023 4:00 PM"), 1_684_296_000_000.0 + 12.0 * 3_600_000.0);
        assert!(parse_lenient("5/17/2023 13:00 PM").is_err());
    }

    #[test]
    fn test_legacy_us_zone_names() {
        assert_eq!(ok("May 17 2023 00:00 EDT"), 1_684_296_000_000.0);
    }

    #[test]
    fn test_legacy_missing_year_defaults_to_2001() {
        let may_17_2001 = days_from(2001, 5, 17);
        assert_eq!(ok("May 17"), may_17_2001);
        assert_eq!(ok("5/17"), may_17_2001);
    }

    #[test]
    fn test_legacy_two_digit_years() {
        assert_eq!(ok("5/17/23"), MAY_17_2023);
        assert_eq!(ok("5/17/99"), days_from(1999, 5, 17));
    }

    #[test]
    fn test_garbage_words() {
        assert!(parse_lenient("hello").is_err());
        assert!(parse_lenient("hello world").is_err());
        assert_eq!(ok("on May 17 2023"), MAY_17_2023);
        assert!(parse_lenient("May 17 2023 foo").is_err());
        assert!(parse_lenient("abc2023").is_err());
    }

    #[test]
    fn test_long_digit_runs_overflow_the_year() {
        assert!(parse_lenient("1684296000").is_err());
        assert!(parse_lenient("1684296000123").is_err());
    }

    #[test]
    fn test_short_digit_runs_are_years() {
        assert_eq!(ok("2023"), days_from(2023, 1, 1));
        assert_eq!(ok("12345"), days_from(12_345, 1, 1));
    }

    #[test]
    fn test_empty_and_symbol_only_inputs() {
        assert!(parse_lenient("").is_err());
        assert!(parse_lenient("   ").is_err());
        assert!(parse_lenient("--").is_err());
        assert!(parse_lenient("(2023)").is_err());
    }

    #[test]
    fn test_non_ascii_input_does_not_panic() {
        assert!(parse_lenient("２０２３年").is_err());
        assert_eq!(ok("😀 2023"), days_from(2023, 1, 1));
        let _ = parse_lenient("((((");
        let _ = parse_lenient("2023-05-17T04:00:00+é");
    }

    #[test]
    fn test_read_milliseconds_scaling() {
        assert_eq!(read_milliseconds(Token::Number { value: 5, len: 1 }), 500);
        assert_eq!(read_milliseconds(Token::Number { value: 12, len: 2 }), 120);
        assert_eq!(read_milliseconds(Token::Number { value: 123, len: 3 }), 123);
        assert_eq!(read_milliseconds(Token::Number { value: 123_456, len: 6 }), 123);
        assert_eq!(read_milliseconds(Token::Number { value: 123, len: 4 }), 12);
    }

    fn days_from(year: i64, month: i64, day: i64) -> f64 {
        crate::temporal::days_from_civil(year, month, day) as f64 * DAY
    }
}
