//! Structure-preserving PII masking.
//!
//! Masks are applied to cleaned values only. They are lossy and one-way:
//! delimiters and the pieces needed for support lookups (email domain,
//! phone last four, birth year) survive, everything else is replaced.

use cdq_model::{INVALID_DATE, MASKED_ADDRESS, MaskKind, UNKNOWN_PLACEHOLDER};

const STARS: &str = "***";

/// Applies the mask selected by `kind` to a cleaned value.
pub fn mask(kind: MaskKind, cleaned: &str) -> String {
    let value = cleaned.trim();
    match kind {
        MaskKind::Name => mask_name(value),
        MaskKind::Email => mask_email(value),
        MaskKind::Phone => mask_phone(value),
        MaskKind::Address => mask_address(value),
        MaskKind::DateOfBirth => mask_date_of_birth(value),
        MaskKind::Keep => value.to_string(),
    }
}

/// `John` -> `J***`. The `[UNKNOWN]` placeholder passes through.
pub fn mask_name(value: &str) -> String {
    if value.is_empty() || value == UNKNOWN_PLACEHOLDER {
        return value.to_string();
    }
    value.chars().take(1).chain(STARS.chars()).collect()
}

/// `john.doe@gmail.com` -> `j***@gmail.com`. Values without `@` pass through.
pub fn mask_email(value: &str) -> String {
    let Some((local, domain)) = value.split_once('@') else {
        return value.to_string();
    };
    let first: String = local.chars().take(1).collect();
    format!("{first}{STARS}@{domain}")
}

/// `555-123-4567` -> `***-***-4567`.
///
/// Values not in three hyphenated segments keep their last four characters.
pub fn mask_phone(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let parts: Vec<&str> = value.split('-').collect();
    if let [_, _, last] = parts.as_slice() {
        return format!("{STARS}-{STARS}-{last}");
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() >= 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{STARS}-{STARS}-{tail}")
    } else {
        STARS.to_string()
    }
}

/// Any real address becomes `[MASKED ADDRESS]`.
pub fn mask_address(value: &str) -> String {
    if value.is_empty() || value == UNKNOWN_PLACEHOLDER {
        return value.to_string();
    }
    MASKED_ADDRESS.to_string()
}

/// `1985-03-15` -> `1985-**-**`. `[INVALID_DATE]` passes through.
pub fn mask_date_of_birth(value: &str) -> String {
    if value.is_empty() || value == INVALID_DATE {
        return value.to_string();
    }
    match value.split('-').collect::<Vec<_>>().as_slice() {
        [year, _, _] => format!("{year}-**-**"),
        _ => "****-**-**".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert_eq!(mask_name("John"), "J***");
        assert_eq!(mask_name(UNKNOWN_PLACEHOLDER), UNKNOWN_PLACEHOLDER);
        assert_eq!(mask_name(""), "");
    }

    #[test]
    fn test_email() {
        assert_eq!(mask_email("john.doe@gmail.com"), "j***@gmail.com");
        assert_eq!(mask_email("not-an-email"), "not-an-email");
        assert_eq!(mask_email("@x.io"), "***@x.io");
    }

    #[test]
    fn test_phone() {
        assert_eq!(mask_phone("555-123-4567"), "***-***-4567");
        assert_eq!(mask_phone("555-1234"), "***-***-1234");
        assert_eq!(mask_phone("12"), "***");
        assert_eq!(mask_phone(""), "");
    }

    #[test]
    fn test_address() {
        assert_eq!(mask_address("12 Main St, Springfield"), MASKED_ADDRESS);
        assert_eq!(mask_address(UNKNOWN_PLACEHOLDER), UNKNOWN_PLACEHOLDER);
    }

    #[test]
    fn test_date_of_birth() {
        assert_eq!(mask_date_of_birth("1985-03-15"), "1985-**-**");
        assert_eq!(mask_date_of_birth(INVALID_DATE), INVALID_DATE);
        assert_eq!(mask_date_of_birth("15.03.1985"), "****-**-**");
    }

    #[test]
    fn test_business_columns_untouched() {
        assert_eq!(mask(MaskKind::Keep, "52000"), "52000");
    }
}
