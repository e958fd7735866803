//! first_name / last_name: 2-50 letters, hyphens, apostrophes, or the placeholder.

use cdq_model::{FailureReason, UNKNOWN_PLACEHOLDER};

use crate::patterns::NAME_CHARACTERS;

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 50;

pub fn check(value: &str) -> Result<(), FailureReason> {
    if value == UNKNOWN_PLACEHOLDER {
        return Ok(());
    }
    if value.is_empty() {
        return Err(FailureReason::Empty);
    }
    let len = value.chars().count();
    if len < MIN_LEN {
        return Err(FailureReason::TooShort {
            value: value.to_string(),
            min: MIN_LEN,
        });
    }
    if len > MAX_LEN {
        return Err(FailureReason::TooLong {
            value: value.to_string(),
            max: MAX_LEN,
        });
    }
    if !NAME_CHARACTERS.is_match(value) {
        return Err(FailureReason::InvalidCharacters {
            value: value.to_string(),
        });
    }
    Ok(())
}
