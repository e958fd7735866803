//! Validation outcome types.
//!
//! Each failure variant carries only the data its message needs. The
//! [`FailureReason::code`] string is stable and meant for machines; the
//! `Display` text is meant for reports.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Which of the two validation passes produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPhase {
    /// Raw data, before any cleaning.
    PreClean,
    /// Cleaned data, after normalization and missing-value filling.
    PostClean,
}

impl ValidationPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::PreClean => "pre-clean",
            Self::PostClean => "post-clean",
        }
    }
}

/// Why a single field failed its predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FailureReason {
    Empty,
    NotInteger { value: String },
    NotPositive { value: String },
    DuplicateId { value: String, occurrences: usize },
    TooShort { value: String, min: usize },
    TooLong { value: String, max: usize },
    InvalidCharacters { value: String },
    InvalidEmail { value: String },
    UnrecognizedPhone { value: String },
    NonStandardPhone { value: String },
    InvalidDateFormat { value: String },
    Underage { value: String, age: f64 },
    ImplausibleAge { value: String, age: f64 },
    NotNumeric { value: String },
    Negative { value: f64 },
    AboveCap { value: f64, cap: f64 },
    InvalidStatus { value: String, allowed: Vec<String> },
}

impl FailureReason {
    /// Stable machine-checkable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::NotInteger { .. } => "not_integer",
            Self::NotPositive { .. } => "not_positive",
            Self::DuplicateId { .. } => "duplicate_id",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::InvalidCharacters { .. } => "invalid_characters",
            Self::InvalidEmail { .. } => "invalid_email",
            Self::UnrecognizedPhone { .. } => "unrecognized_phone",
            Self::NonStandardPhone { .. } => "non_standard_phone",
            Self::InvalidDateFormat { .. } => "invalid_date_format",
            Self::Underage { .. } => "underage",
            Self::ImplausibleAge { .. } => "implausible_age",
            Self::NotNumeric { .. } => "not_numeric",
            Self::Negative { .. } => "negative",
            Self::AboveCap { .. } => "above_cap",
            Self::InvalidStatus { .. } => "invalid_status",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "value is empty"),
            Self::NotInteger { value } => write!(f, "must be an integer, got '{value}'"),
            Self::NotPositive { value } => write!(f, "must be positive, got {value}"),
            Self::DuplicateId { value, occurrences } => {
                write!(f, "duplicate customer_id {value} ({occurrences} occurrences)")
            }
            Self::TooShort { value, min } => write!(f, "too short (min {min} chars): '{value}'"),
            Self::TooLong { max, .. } => write!(f, "too long (max {max} chars)"),
            Self::InvalidCharacters { value } => {
                write!(f, "contains non-alphabetic characters: '{value}'")
            }
            Self::InvalidEmail { value } => write!(f, "invalid email format: '{value}'"),
            Self::UnrecognizedPhone { value } => write!(f, "unrecognizable phone format: '{value}'"),
            Self::NonStandardPhone { value } => {
                write!(f, "non-standard phone format (expected XXX-XXX-XXXX): '{value}'")
            }
            Self::InvalidDateFormat { value } => {
                write!(f, "not a YYYY-MM-DD date: '{value}'")
            }
            Self::Underage { value, age } => {
                write!(f, "customer appears to be under 18 (age ~{age:.1}): '{value}'")
            }
            Self::ImplausibleAge { value, age } => {
                write!(f, "date of birth implies impossibly old age ({age:.1}): '{value}'")
            }
            Self::NotNumeric { value } => write!(f, "not a number: '{value}'"),
            Self::Negative { value } => write!(f, "cannot be negative: {value}"),
            Self::AboveCap { value, cap } => write!(f, "exceeds cap of {cap}: {value}"),
            Self::InvalidStatus { value, allowed } => {
                write!(f, "invalid account_status '{value}' (must be: {})", allowed.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFailure {
    pub field: Field,
    pub reason: FailureReason,
}

/// Result of running every field predicate against one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Row number within the input (1-based, excluding header).
    pub row: usize,
    pub customer_id: String,
    pub failures: Vec<FieldFailure>,
}

impl ValidationOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_on(&self, field: Field) -> bool {
        self.failures.iter().any(|failure| failure.field == field)
    }
}

/// One validation pass over a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub phase: ValidationPhase,
    pub outcomes: Vec<ValidationOutcome>,
}

impl ValidationReport {
    pub fn total_rows(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total_rows() - self.passed_count()
    }

    /// Number of individual field failures across all rows.
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.failures.len()).sum()
    }

    /// 1-indexed rows that failed at least one predicate.
    pub fn failed_rows(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed())
            .map(|o| o.row)
            .collect()
    }

    /// Failures grouped by column, each paired with its outcome's row and id.
    pub fn failures_by_field(&self) -> BTreeMap<Field, Vec<(&ValidationOutcome, &FailureReason)>> {
        let mut grouped: BTreeMap<Field, Vec<(&ValidationOutcome, &FailureReason)>> =
            BTreeMap::new();
        for outcome in &self.outcomes {
            for failure in &outcome.failures {
                grouped
                    .entry(failure.field)
                    .or_default()
                    .push((outcome, &failure.reason));
            }
        }
        grouped
    }

    /// 1-indexed rows that failed the given column.
    pub fn rows_failing(&self, field: Field) -> Vec<usize> {
        self.outcomes
            .iter()
            .filter(|o| o.failed_on(field))
            .map(|o| o.row)
            .collect()
    }
}
