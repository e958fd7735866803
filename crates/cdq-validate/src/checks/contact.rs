//! email and phone.

use cdq_model::FailureReason;

use crate::patterns::{ANY_PHONE, EMAIL, STANDARD_PHONE};

pub fn check_email(value: &str) -> Result<(), FailureReason> {
    if value.is_empty() {
        return Err(FailureReason::Empty);
    }
    if !EMAIL.is_match(value) {
        return Err(FailureReason::InvalidEmail {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Only `DDD-DDD-DDDD` passes. Other ten-digit layouts are reported as
/// non-standard, anything else as unrecognisable.
pub fn check_phone(value: &str) -> Result<(), FailureReason> {
    if value.is_empty() {
        return Err(FailureReason::Empty);
    }
    if !ANY_PHONE.is_match(value) {
        return Err(FailureReason::UnrecognizedPhone {
            value: value.to_string(),
        });
    }
    if !STANDARD_PHONE.is_match(value) {
        return Err(FailureReason::NonStandardPhone {
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(check_email("john@gmail.com").is_ok());
        assert_eq!(check_email(""), Err(FailureReason::Empty));
        assert!(matches!(
            check_email("john@gmail"),
            Err(FailureReason::InvalidEmail { .. })
        ));
    }

    #[test]
    fn test_phone() {
        assert!(check_phone("555-123-4567").is_ok());
        assert!(matches!(
            check_phone("(555) 123-4567"),
            Err(FailureReason::NonStandardPhone { .. })
        ));
        assert!(matches!(
            check_phone("555-1234"),
            Err(FailureReason::UnrecognizedPhone { .. })
        ));
        assert_eq!(check_phone(""), Err(FailureReason::Empty));
    }
}
