//! # Number Rendering
//!
//! Renders an `f64` the way `Number.prototype.toString()` does. Every length,
//! leading-digit and digit-count check in the classifier runs against this
//! string form, so `1e21`, `0.0000001` and `-0` must render exactly as
//! dataset producers wrote them (`1e+21`, `1e-7`, `0`).
//!
//! Rust's `{:e}` formatting yields the shortest round-trip digits, which are
//! the same digits ECMAScript picks; only the layout differs.

/// Render a number using ECMAScript `Number::toString` layout rules.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value < 0.0 {
        return format!("-{}", format_number(-value));
    }

    let (digits, n) = shortest_digits(value);
    let k = digits.len() as i32;

    if k <= n && n <= 21 {
        let mut out = digits;
        out.extend(std::iter::repeat('0').take((n - k) as usize));
        out
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let exp = n - 1;
        let sign = if exp < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", exp.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exp.abs())
        }
    }
}

/// Shortest decimal digits of a positive finite `value` and the exponent `n`
/// such that `value = 0.d1d2...dk * 10^n`.
fn shortest_digits(value: f64) -> (String, i32) {
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let trimmed = digits.trim_end_matches('0');
    let digits = if trimmed.is_empty() { "0" } else { trimmed };
    (digits.to_string(), exponent + 1)
}
