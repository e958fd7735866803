//! address: 10-200 characters, or the placeholder.

use cdq_model::{FailureReason, UNKNOWN_PLACEHOLDER};

const MIN_LEN: usize = 10;
const MAX_LEN: usize = 200;

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
    Ok(())
}
