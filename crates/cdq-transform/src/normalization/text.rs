//! Case normalization for names, emails, and status tokens.

use super::Normalization;

/// Upper-cases the first letter of each whitespace- or hyphen-delimited
/// token and lower-cases the rest. Never adds or removes characters.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_token_start = true;
    for ch in value.chars() {
        if at_token_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_token_start = ch.is_whitespace() || ch == '-';
    }
    out
}

pub fn normalize_name(raw: &str) -> Normalization {
    Normalization::compare(raw, title_case(raw.trim()))
}

pub fn normalize_email(raw: &str) -> Normalization {
    Normalization::compare(raw, raw.trim().to_lowercase())
}

pub fn normalize_status(raw: &str) -> Normalization {
    Normalization::compare(raw, raw.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("JOHN"), "John");
        assert_eq!(title_case("mary-jane"), "Mary-Jane");
        assert_eq!(title_case("van der berg"), "Van Der Berg");
        assert_eq!(title_case("o'brien"), "O'brien");
    }

    #[test]
    fn test_name_changes_only_case() {
        let result = normalize_name("jOHN");
        assert_eq!(result.value, "John");
        assert!(result.changed());
        assert!(!normalize_name("John").changed());
    }

    #[test]
    fn test_email_and_status_lowercase() {
        assert_eq!(normalize_email("John@Gmail.com").value, "john@gmail.com");
        assert!(!normalize_email("john@gmail.com").changed());
        assert_eq!(normalize_status("Suspended").value, "suspended");
    }
}
