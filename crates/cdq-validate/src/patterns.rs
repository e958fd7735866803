//! Compiled value patterns shared by checks, profiling, and PII detection.

use std::sync::LazyLock;

use regex::Regex;

/// `local@domain.tld` with a top-level segment of at least two letters.
pub(crate) static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

/// Canonical `DDD-DDD-DDDD`.
pub(crate) static STANDARD_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("Invalid phone regex"));

/// Any common ten-digit phone layout: parentheses, spaces, dots, hyphens.
pub(crate) static ANY_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4})$").expect("Invalid phone regex")
});

pub(crate) static PARENTHESIZED_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").expect("Invalid phone regex"));

pub(crate) static DOTTED_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{4}$").expect("Invalid phone regex"));

pub(crate) static BARE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("Invalid phone regex"));

/// Canonical date shape `YYYY-MM-DD` (shape only, not calendar validity).
pub(crate) static ISO_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date regex"));

pub(crate) static ISO_SLASH_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").expect("Invalid date regex"));

pub(crate) static US_DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("Invalid date regex"));

/// Any accepted date shape, used as a PII detector.
pub(crate) static ANY_DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}[-/]\d{2}[-/]\d{2}$|^\d{2}/\d{2}/\d{4}$").expect("Invalid date regex")
});

/// Letters, hyphen, and apostrophe only.
pub(crate) static NAME_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\-']+$").expect("Invalid name regex"));

/// A plain alphabetic name, used as a PII detector.
pub(crate) static PLAIN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,50}$").expect("Invalid name regex"));

/// Starts with a house number followed by a street word.
pub(crate) static STREET_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s+\w+").expect("Invalid address regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL.is_match("john.doe@gmail.com"));
        assert!(EMAIL.is_match("A+b@sub.example.org"));
        assert!(!EMAIL.is_match("john@gmail"));
        assert!(!EMAIL.is_match("john@gmail.c"));
        assert!(!EMAIL.is_match("not-an-email"));
    }

    #[test]
    fn test_phone_patterns() {
        assert!(STANDARD_PHONE.is_match("555-123-4567"));
        assert!(!STANDARD_PHONE.is_match("(555) 123-4567"));
        for phone in ["(555) 123-4567", "555.123.4567", "5551234567", "555 123 4567"] {
            assert!(ANY_PHONE.is_match(phone), "{phone}");
        }
        assert!(!ANY_PHONE.is_match("555-1234"));
    }

    #[test]
    fn test_detector_patterns() {
        assert!(STREET_ADDRESS.is_match("12 Main St"));
        assert!(!STREET_ADDRESS.is_match("Main St 12"));
        assert!(ANY_DATE_SHAPE.is_match("1985/03/15"));
        assert!(ANY_DATE_SHAPE.is_match("03/15/1985"));
        assert!(!ANY_DATE_SHAPE.is_match("15.03.1985"));
        assert!(PLAIN_NAME.is_match("John"));
        assert!(!PLAIN_NAME.is_match("O'Brien"));
    }
}
