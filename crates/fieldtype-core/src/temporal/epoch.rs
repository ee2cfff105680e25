//! # Epoch Seconds
//!
//! Lenient epoch-seconds parsing: the first signed decimal
//! (`[+-]?\d+(\.\d{1,3})?`) found anywhere in the input is read as seconds
//! since the epoch. Surrounding text is ignored, so `"ts=1684296000;"`
//! parses. The classifier only applies this to ten-character inputs, where it
//! recognizes values between 1973 and 2286 for a leading `1` digit.

use crate::error::DateParseError;
use crate::temporal::time_clip;

/// Parse the first signed decimal in `input` as epoch seconds, returning
/// milliseconds since the epoch.
///
/// # Errors
///
/// Returns [`DateParseError::NoTimestamp`] if the input contains no digits,
/// and [`DateParseError::OutOfRange`] if the scaled value exceeds ±8.64e15 ms.
pub fn parse_epoch_seconds(input: &str) -> Result<f64, DateParseError> {
    let numeral = find_numeral(input).ok_or_else(|| DateParseError::NoTimestamp(input.to_string()))?;
    let seconds: f64 = numeral
        .parse()
        .map_err(|_| DateParseError::NoTimestamp(input.to_string()))?;
    time_clip(seconds * 1000.0)
}

/// Leftmost match of `[+-]?\d+(\.\d{1,3})?`.
fn find_numeral(input: &str) -> Option<&str> {
    let bytes = input.as_bytes();
    let first_digit = bytes.iter().position(u8::is_ascii_digit)?;

    let start = match first_digit.checked_sub(1).map(|i| bytes[i]) {
        Some(b'+') | Some(b'-') => first_digit - 1,
        _ => first_digit,
    };

    let mut end = first_digit
        + bytes[first_digit..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();

    if bytes.get(end) == Some(&b'.') {
        let fraction = bytes[end + 1..]
            .iter()
            .take(3)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if fraction > 0 {
            end += 1 + fraction;
        }
    }

    Some(&input[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_seconds() {
        assert_eq!(parse_epoch_seconds("1684296000").unwrap(), 1_684_296_000_000.0);
        assert_eq!(parse_epoch_seconds("0").unwrap(), 0.0);
    }

    #[test]
    fn test_signed_and_fractional() {
        assert_eq!(parse_epoch_seconds("-86400").unwrap(), -86_400_000.0);
        assert_eq!(parse_epoch_seconds("+1.5").unwrap(), 1_500.0);
        assert_eq!(parse_epoch_seconds("1.23456789").unwrap(), 1_234.0);
    }

    #[test]
    fn test_numeral_found_inside_text() {
        assert_eq!(parse_epoch_seconds("ts=1684296000;").unwrap(), 1_684_296_000_000.0);
        assert_eq!(parse_epoch_seconds("2023-05-17").unwrap(), 2_023_000.0);
        assert_eq!(find_numeral("abc-12.5x"), Some("-12.5"));
        assert_eq!(find_numeral("7."), Some("7"));
    }

    #[test]
    fn test_no_digits_rejected() {
        assert!(matches!(
            parse_epoch_seconds("never"),
            Err(DateParseError::NoTimestamp(_))
        ));
        assert!(parse_epoch_seconds("").is_err());
        assert!(parse_epoch_seconds("+-.").is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(parse_epoch_seconds("8640000000000").is_ok());
        assert!(matches!(
            parse_epoch_seconds("8640000000001"),
            Err(DateParseError::OutOfRange(_))
        ));
    }
}
