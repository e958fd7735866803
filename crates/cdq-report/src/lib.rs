//! Report generation for pipeline runs.
//!
//! Every renderer returns the report as lines so callers and tests can
//! inspect counts and row references without touching the filesystem:
//!
//! - **Quality profile**: completeness, types, issues by severity
//! - **PII detection**: risk classes, detections, per-row exposure
//! - **Validation results**: per-column failures and row-by-row pass/fail
//! - **Cleaning log**: actions, fills, before/after comparison
//! - **Masked sample**: before/after rows and masking rules
//! - **Execution report**: stage timeline and summary counts
//!
//! [`write_outputs`] writes the cleaned and masked tables, all six reports,
//! and `action_log.json` into one directory.

mod cleaning;
mod common;
mod execution;
mod masking;
mod pii;
mod quality;
mod validation;
mod writer;

pub use cleaning::render_cleaning_log;
pub use execution::render_execution_report;
pub use masking::render_masked_sample;
pub use pii::render_pii_report;
pub use quality::render_quality_report;
pub use validation::render_validation_results;
pub use writer::{
    ACTION_LOG_FILE, CLEANED_TABLE_FILE, CLEANING_LOG_FILE, EXECUTION_REPORT_FILE,
    MASKED_SAMPLE_FILE, MASKED_TABLE_FILE, OutputPaths, PII_REPORT_FILE, QUALITY_REPORT_FILE,
    VALIDATION_RESULTS_FILE, write_action_log_json, write_outputs, write_profile_reports,
};
