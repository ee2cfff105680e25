//! # Temporal Parsing
//!
//! The three date parsers the classifier's override rules depend on:
//!
//! - [`lenient`]: free-form timestamp strings as a browser `Date`
//!   constructor accepts them (ISO date-time first, legacy fallback).
//! - [`formats`]: strict parsing against the fixed, ordered
//!   [`formats::DATE_FORMATS`] list.
//! - [`epoch`]: epoch-seconds extraction.
//!
//! All three produce a time value in milliseconds since
//! 1970-01-01T00:00:00Z as an `f64` and share the same validity bound:
//! `|t| <= 8.64e15` ms (±100,000,000 days around the epoch).
//!
//! Wall-clock times without an explicit offset are interpreted as UTC so
//! that results never depend on the host time zone.

pub mod epoch;
pub mod formats;
pub mod lenient;

pub use epoch::parse_epoch_seconds;
pub use formats::{match_date_formats, parse_strict, DateFormat, DATE_FORMATS};
pub use lenient::parse_lenient;

use crate::error::DateParseError;

/// Largest representable distance from the epoch, in milliseconds.
pub const MAX_TIME_VALUE_MS: f64 = 8.64e15;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Reject time values outside the representable range.
pub(crate) fn time_clip(ms: f64) -> Result<f64, DateParseError> {
    if ms.is_finite() && ms.abs() <= MAX_TIME_VALUE_MS {
        Ok(ms.trunc() + 0.0)
    } else {
        Err(DateParseError::OutOfRange(ms))
    }
}

/// Days from 1970-01-01 to `year-month-01` plus `day - 1`.
///
/// `month` is 1-based and must be in `1..=12`; `day` may run past the end of
/// the month and rolls over into the following ones.
pub(crate) fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Combine calendar and clock fields into a time value.
///
/// `offset_minutes` is the UTC offset of the wall-clock fields (east positive).
pub(crate) fn make_time_value(
    year: i64,
    month: i64,
    day: i64,
    clock: [i64; 4],
    offset_minutes: i64,
) -> Result<f64, DateParseError> {
    let [hour, minute, second, millisecond] = clock;
    let days = days_from_civil(year, month, day) as f64;
    let time = hour as f64 * 3_600_000.0
        + minute as f64 * 60_000.0
        + second as f64 * 1_000.0
        + millisecond as f64;
    time_clip(days * MS_PER_DAY + time - offset_minutes as f64 * 60_000.0)
}
