//! Phone number normalization.

use super::Normalization;

/// Digits of `value` in order, everything else dropped.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Re-delimits a phone number as `DDD-DDD-DDDD`.
///
/// Only applies when exactly ten digits remain after stripping punctuation.
/// Any other digit count leaves the value untouched; digits are never
/// invented or dropped.
pub fn normalize_phone(raw: &str) -> Normalization {
    let digits = digits_only(raw);
    if digits.len() != 10 {
        return Normalization::unchanged(raw);
    }
    let canonical = format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]);
    Normalization::compare(raw, canonical)
}
