//! date_of_birth / created_date: canonical `YYYY-MM-DD` shape.
//!
//! Empty values and the `[INVALID_DATE]` sentinel pass; the sentinel is
//! already surfaced by the cleaning log. Shape is checked, not calendar
//! validity: cleaning only ever writes real dates.

use cdq_model::{FailureReason, INVALID_DATE};
use chrono::NaiveDate;

use crate::patterns::ISO_DATE_SHAPE;
use crate::rule_set::{MAX_AGE_YEARS, MIN_AGE_YEARS, RuleSet, age_in_years};

pub fn check_date(value: &str) -> Result<(), FailureReason> {
    if value.is_empty() || value == INVALID_DATE || ISO_DATE_SHAPE.is_match(value) {
        return Ok(());
    }
    Err(FailureReason::InvalidDateFormat {
        value: value.to_string(),
    })
}

/// [`check_date`] plus, when the rule set enforces them, the age bounds.
pub fn check_date_of_birth(value: &str, rules: &RuleSet) -> Result<(), FailureReason> {
    check_date(value)?;
    if !rules.enforces_age_bounds() {
        return Ok(());
    }
    let Ok(dob) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
        return Ok(());
    };
    let age = age_in_years(dob, rules.as_of);
    if age < MIN_AGE_YEARS {
        return Err(FailureReason::Underage {
            value: value.to_string(),
            age,
        });
    }
    if age > MAX_AGE_YEARS {
        return Err(FailureReason::ImplausibleAge {
            value: value.to_string(),
            age,
        });
    }
    Ok(())
}
