//! Path id coercion.
//!
//! Path segments are coerced to numbers with the loose rules of a dynamic
//! runtime's numeric conversion: surrounding whitespace is ignored, an empty
//! string is zero, radix prefixes are honored, and anything unparseable is NaN.
//! Whether the resulting number is usable as a record id is a separate question
//! answered by [`record_id`], which reports failures the way the store would.

use crate::storage::RepositoryError;

/// Message returned to clients when a path id is not a number.
pub const ID_NOT_A_NUMBER: &str = "id should be a number";

/// Coerces a raw path segment into a number.
///
/// Returns `f64::NAN` when the segment is not numeric.
///
/// # Examples
///
/// ```
/// use kennel_core::dog::coerce_id;
///
/// assert_eq!(coerce_id("42"), 42.0);
/// assert_eq!(coerce_id(" 7 "), 7.0);
/// assert_eq!(coerce_id("0x1f"), 31.0);
/// assert_eq!(coerce_id("1.5"), 1.5);
/// assert!(coerce_id("abc").is_nan());
/// ```
pub fn coerce_id(raw: &str) -> f64 {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    parse_decimal_literal(trimmed).unwrap_or(f64::NAN)
}

/// Converts a coerced number into a record id.
///
/// Record ids are integers. NaN, infinities, fractions, and values outside
/// the `i64` range are rejected as invalid data.
pub fn record_id(value: f64) -> Result<i64, RepositoryError> {
    exact_integer(value).ok_or_else(|| {
        RepositoryError::InvalidData(format!(
            "Invalid value for `id`: expected an integer, provided {value}"
        ))
    })
}

/// Returns the value as `i64` if it is a finite integer inside the `i64` range.
pub(crate) fn exact_integer(value: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if !value.is_finite() || value.fract() != 0.0 || value < -LIMIT || value >= LIMIT {
        return None;
    }

    Some(value as i64)
}

/// Parses `0x`, `0o` and `0b` prefixed integers. Signs are not allowed.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }

    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    });

    Some(value.unwrap_or(f64::NAN))
}

/// Parses a decimal literal with optional sign, fraction and exponent.
fn parse_decimal_literal(s: &str) -> Option<f64> {
    // `str::parse::<f64>` also accepts "inf" and "nan" spellings; those are
    // not numeric here, so only literal characters are let through.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }

    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerces_plain_integers() {
        assert_eq!(coerce_id("1"), 1.0);
        assert_eq!(coerce_id("999999"), 999_999.0);
        assert_eq!(coerce_id("-3"), -3.0);
        assert_eq!(coerce_id("+8"), 8.0);
    }

    #[test]
    fn test_ignores_surrounding_whitespace() {
        assert_eq!(coerce_id("  12\t"), 12.0);
        assert_eq!(coerce_id("\n5\n"), 5.0);
    }

    #[test]
    fn test_empty_and_blank_are_zero() {
        assert_eq!(coerce_id(""), 0.0);
        assert_eq!(coerce_id("   "), 0.0);
    }

    #[test]
    fn test_honors_radix_prefixes() {
        assert_eq!(coerce_id("0x10"), 16.0);
        assert_eq!(coerce_id("0XfF"), 255.0);
        assert_eq!(coerce_id("0o17"), 15.0);
        assert_eq!(coerce_id("0b101"), 5.0);
    }

    #[test]
    fn test_malformed_radix_literals_are_nan() {
        assert!(coerce_id("0x").is_nan());
        assert!(coerce_id("0xZZ").is_nan());
        assert!(coerce_id("0b102").is_nan());
        assert!(coerce_id("-0x10").is_nan());
    }

    #[test]
    fn test_accepts_fractions_and_exponents() {
        assert_eq!(coerce_id("1.5"), 1.5);
        assert_eq!(coerce_id(".5"), 0.5);
        assert_eq!(coerce_id("2."), 2.0);
        assert_eq!(coerce_id("1e3"), 1000.0);
        assert_eq!(coerce_id("25E-1"), 2.5);
    }

    #[test]
    fn test_infinity_spelling_is_exact() {
        assert_eq!(coerce_id("Infinity"), f64::INFINITY);
        assert_eq!(coerce_id("-Infinity"), f64::NEG_INFINITY);
        assert!(coerce_id("inf").is_nan());
        assert!(coerce_id("infinity").is_nan());
    }

    #[test]
    fn test_non_numeric_is_nan() {
        assert!(coerce_id("abc").is_nan());
        assert!(coerce_id("12abc").is_nan());
        assert!(coerce_id("NaN").is_nan());
        assert!(coerce_id("1e").is_nan());
        assert!(coerce_id(".").is_nan());
        assert!(coerce_id("1_000").is_nan());
    }

    #[test]
    fn test_record_id_accepts_integers() {
        assert_eq!(record_id(1.0), Ok(1));
        assert_eq!(record_id(-4.0), Ok(-4));
        assert_eq!(record_id(0.0), Ok(0));
    }

    #[test]
    fn test_record_id_rejects_non_integers() {
        for value in [f64::NAN, f64::INFINITY, 1.5, 1e19, -1e19] {
            assert!(
                matches!(record_id(value), Err(RepositoryError::InvalidData(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_record_id_error_names_the_value() {
        let err = record_id(f64::NAN).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid data: Invalid value for `id`: expected an integer, provided NaN"
        );
    }
}
