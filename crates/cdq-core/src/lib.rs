//! Customer data-quality pipeline.
//!
//! Drives a loaded [`Dataset`](cdq_model::Dataset) through
//! Normalize → Validate(pre) → Fill-missing → Validate(post) → Mask,
//! returning a [`PipelineRun`] that owns every intermediate table, the
//! append-only [`ActionLog`], and the stage [`Timeline`].

pub mod options;
pub mod pipeline;
pub mod provenance;
pub mod stages;
pub mod timeline;

pub use options::{PipelineOptions, parse_as_of};
pub use pipeline::{PipelineRun, run_file, run_pipeline};
pub use provenance::{ActionLog, CleaningCounters};
pub use stages::{CRITICAL_FIELDS, critical_failures, fill_missing, mask_dataset, normalize_dataset};
pub use timeline::{Stage, StageEvent, StageRecord, StageRecorder, Timeline};
