//! Customer record validation.
//!
//! - [`validate_dataset`]: run the pre-clean or post-clean [`RuleSet`] over every row
//! - [`profile_dataset`]: read-only quality profile of raw data
//! - [`detect_pii`]: PII detection and per-row exposure
//!
//! Row-level problems are values, never errors: every predicate returns
//! `Result<(), FailureReason>` and a bad row never stops the pass.

pub mod checks;
mod patterns;
pub mod pii;
pub mod profile;
mod rule_set;
mod validator;

pub use checks::{CheckContext, IdIndex, check_value};
pub use pii::{
    ColumnDetections, DETECTED_FIELDS, ExposureLevel, PiiDetection, PiiReport, RowExposure,
    detect_pii, detector_description,
};
pub use profile::{
    ColumnCompleteness, DateSample, ExpectedKind, IssueRow, PhoneShape, QualityIssue,
    QualityProfile, Severity, TypeConformance, profile_dataset,
};
pub use rule_set::{
    ACCOUNT_STATUSES, INCOME_CAP, MAX_AGE_YEARS, MIN_AGE_YEARS, RuleSet, age_in_years,
};
pub use validator::{validate_dataset, validate_record};
