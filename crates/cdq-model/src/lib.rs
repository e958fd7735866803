//! Customer record data model.
//!
//! This crate provides the types shared by every pipeline stage:
//! - [`Field`] and [`Record`]: the fixed ten-column customer schema
//! - [`Dataset`]: ordered rows with 1-indexed row references
//! - [`ActionLogEntry`]: one audited cell mutation
//! - [`ValidationReport`]: per-row outcomes of one validation pass
//! - [`RuleRegistry`]: the per-column normalizer, validator, fill and mask table

pub mod error;
pub mod field;
pub mod provenance;
pub mod record;
pub mod rules;
pub mod validation;

pub use error::{ModelError, Result};
pub use field::{Field, INVALID_DATE, MASKED_ADDRESS, STATUS_UNKNOWN, UNKNOWN_PLACEHOLDER};
pub use provenance::{ActionCategory, ActionLogEntry};
pub use record::{Dataset, Record, is_missing};
pub use rules::{
    FieldRule, MaskKind, MissingPolicy, NormalizerKind, PiiClass, PiiRisk, RuleRegistry,
    ValidatorKind,
};
pub use validation::{
    FailureReason, FieldFailure, ValidationOutcome, ValidationPhase, ValidationReport,
};
