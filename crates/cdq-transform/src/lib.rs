//! Customer record transforms.
//!
//! Provides the three value-level stages of the pipeline:
//! - **normalization**: canonicalise formats, or flag values that cannot be repaired
//! - **missing**: fill empty values from the column's fill policy
//! - **masking**: redact cleaned PII while keeping its shape
//!
//! All functions are pure; recording what changed is the caller's job.

pub mod masking;
pub mod missing;
pub mod normalization;

pub use masking::{mask, mask_address, mask_date_of_birth, mask_email, mask_name, mask_phone};
pub use missing::{Resolution, resolve};
pub use normalization::{
    ACCEPTED_DATE_FORMATS, DateFormat, DateParse, NormalizeOutcome, Normalization, normalize,
    parse_date,
};
