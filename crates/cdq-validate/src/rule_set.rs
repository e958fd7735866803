//! Pre-clean and post-clean rule sets.
//!
//! Both passes run the same predicates. They differ in two places only:
//! the pre-clean pass enforces the date-of-birth age bounds, and the
//! post-clean pass accepts `unknown` as an account status because the fill
//! policy is what introduces it.

use cdq_model::{STATUS_UNKNOWN, ValidationPhase};
use chrono::NaiveDate;

/// Account statuses accepted by both passes.
pub const ACCOUNT_STATUSES: [&str; 3] = ["active", "inactive", "suspended"];

const POST_CLEAN_STATUSES: [&str; 4] = ["active", "inactive", "suspended", STATUS_UNKNOWN];

/// Youngest acceptable customer age in years.
pub const MIN_AGE_YEARS: f64 = 18.0;
/// Oldest plausible customer age in years.
pub const MAX_AGE_YEARS: f64 = 120.0;
/// Inclusive income upper bound.
pub const INCOME_CAP: f64 = 10_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub phase: ValidationPhase,
    /// Reference date for age calculations.
    pub as_of: NaiveDate,
}

impl RuleSet {
    pub fn pre_clean(as_of: NaiveDate) -> Self {
        Self {
            phase: ValidationPhase::PreClean,
            as_of,
        }
    }

    pub fn post_clean(as_of: NaiveDate) -> Self {
        Self {
            phase: ValidationPhase::PostClean,
            as_of,
        }
    }

    pub fn allowed_statuses(&self) -> &'static [&'static str] {
        match self.phase {
            ValidationPhase::PreClean => &ACCOUNT_STATUSES,
            ValidationPhase::PostClean => &POST_CLEAN_STATUSES,
        }
    }

    pub fn enforces_age_bounds(&self) -> bool {
        self.phase == ValidationPhase::PreClean
    }
}

/// Age in years as `days / 365.25`.
pub fn age_in_years(date_of_birth: NaiveDate, as_of: NaiveDate) -> f64 {
    (as_of - date_of_birth).num_days() as f64 / 365.25
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_sets_differ_only_by_unknown() {
        let as_of = date(2025, 1, 1);
        let pre = RuleSet::pre_clean(as_of);
        let post = RuleSet::post_clean(as_of);
        assert!(!pre.allowed_statuses().contains(&"unknown"));
        assert!(post.allowed_statuses().contains(&"unknown"));
        assert_eq!(post.allowed_statuses().len(), pre.allowed_statuses().len() + 1);
    }

    #[test]
    fn age_uses_julian_year() {
        let age = age_in_years(date(2000, 1, 1), date(2025, 1, 1));
        assert!((age - 25.0).abs() < 0.01);
        assert!(age_in_years(date(2010, 6, 1), date(2025, 1, 1)) < MIN_AGE_YEARS);
    }
}
