//! Run options.
//!
//! The rule registry is fixed at compile time; these are the only knobs a
//! caller can turn.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

/// Options for a single pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Reference date for the pre-clean age rule.
    pub as_of: NaiveDate,
    /// Whether the Validate(pre) stage runs.
    pub pre_validation: bool,
    /// Rows shown before/after in the masking sample.
    pub mask_sample_rows: usize,
}

impl PipelineOptions {
    pub const DEFAULT_MASK_SAMPLE_ROWS: usize = 3;

    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            pre_validation: true,
            mask_sample_rows: Self::DEFAULT_MASK_SAMPLE_ROWS,
        }
    }

    #[must_use]
    pub fn with_pre_validation(mut self, enable: bool) -> Self {
        self.pre_validation = enable;
        self
    }

    #[must_use]
    pub fn with_mask_sample_rows(mut self, rows: usize) -> Self {
        self.mask_sample_rows = rows;
        self
    }
}

impl Default for PipelineOptions {
    /// Uses today's UTC date as the reference date.
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

/// Parses a `YYYY-MM-DD` reference date.
pub fn parse_as_of(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid reference date '{value}', expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_as_of() {
        assert_eq!(
            parse_as_of(" 2025-06-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        let error = parse_as_of("06/01/2025").unwrap_err();
        assert!(error.to_string().contains("06/01/2025"));
    }

    #[test]
    fn test_builders() {
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let options = PipelineOptions::new(as_of)
            .with_pre_validation(false)
            .with_mask_sample_rows(5);
        assert!(!options.pre_validation);
        assert_eq!(options.mask_sample_rows, 5);
        assert_eq!(PipelineOptions::new(as_of).mask_sample_rows, 3);
    }
}
