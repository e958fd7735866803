//! Whole-run orchestration.
//!
//! # Stage order
//!
//! 1. **Load** - read the raw table ([`run_file`] only)
//! 2. **Profile** - quality profile and PII scan of the raw table
//! 3. **Normalize** - per-column canonicalisation
//! 4. **Validate (pre-clean)** - optional, reporting only, checks the table as loaded
//! 5. **Fill missing** - per-column fill policy
//! 6. **Validate (post-clean)** - same predicates, post-clean rule set
//! 7. **Detect PII** - exposure count on the cleaned table
//! 8. **Mask** - redacted copy of the cleaned table
//!
//! Every stage is total: a bad row is retained and surfaced, never dropped.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use cdq_ingest::read_customer_table;
use cdq_model::{Dataset, Field, RuleRegistry, ValidationReport};
use cdq_validate::{
    DETECTED_FIELDS, PiiReport, QualityProfile, RuleSet, Severity, detect_pii, profile_dataset,
    validate_dataset,
};
use tracing::{info, info_span, warn};

use crate::options::PipelineOptions;
use crate::provenance::ActionLog;
use crate::stages::{critical_failures, fill_missing, mask_dataset, normalize_dataset};
use crate::timeline::{Stage, StageRecorder, Timeline};

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub options: PipelineOptions,
    pub registry: RuleRegistry,
    /// The table as loaded.
    pub raw: Dataset,
    pub cleaned: Dataset,
    pub masked: Dataset,
    pub log: ActionLog,
    pub profile: QualityProfile,
    /// PII scan of the raw table.
    pub pii: PiiReport,
    /// PII scan of the cleaned table, before masking.
    pub pii_cleaned: PiiReport,
    /// Absent when pre-clean validation was disabled.
    pub pre_validation: Option<ValidationReport>,
    pub post_validation: ValidationReport,
    /// Post-clean failures on critical columns, by column.
    pub critical_failures: BTreeMap<Field, Vec<usize>>,
    pub timeline: Timeline,
}

impl PipelineRun {
    pub fn total_rows(&self) -> usize {
        self.raw.len()
    }

    pub fn has_critical_failures(&self) -> bool {
        !self.critical_failures.is_empty()
    }
}

/// Loads `path` and runs the pipeline over it.
///
/// A missing or structurally unusable input aborts before any stage runs.
pub fn run_file(path: &Path, options: &PipelineOptions) -> Result<PipelineRun> {
    let mut timeline = Timeline::start();
    let mut load = StageRecorder::begin(Stage::Load);
    let raw = match read_customer_table(path) {
        Ok(raw) => raw,
        Err(error) => {
            load.fail(format!("{} could not be loaded", path.display()));
            load.finish();
            return Err(error).with_context(|| format!("load {}", path.display()));
        }
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("input");
    load.ok(format!(
        "Loaded {file_name} - {} rows, {} columns",
        raw.len(),
        Field::ALL.len()
    ));
    timeline.push(load.finish());
    Ok(execute(raw, options, timeline))
}

/// Runs every stage over an already loaded table.
pub fn run_pipeline(raw: Dataset, options: &PipelineOptions) -> PipelineRun {
    execute(raw, options, Timeline::start())
}

fn execute(raw: Dataset, options: &PipelineOptions, mut timeline: Timeline) -> PipelineRun {
    let span = info_span!("pipeline", rows = raw.len(), as_of = %options.as_of);
    let _guard = span.enter();
    let registry = RuleRegistry::standard();
    let total = raw.len();
    let mut log = ActionLog::new();

    // Profile
    let mut stage = StageRecorder::begin(Stage::Profile);
    let profile = profile_dataset(&raw, options.as_of);
    let pii = detect_pii(&raw, &registry);
    let critical = profile.severity_count(Severity::Critical);
    stage.event(
        format!(
            "{} quality issue(s): {} critical, {} high, {} medium",
            profile.issues.len(),
            critical,
            profile.severity_count(Severity::High),
            profile.severity_count(Severity::Medium)
        ),
        critical == 0,
    );
    stage.ok(format!(
        "{} of {total} row(s) fully exposed, {} partially exposed",
        pii.fully_exposed_count(),
        pii.partially_exposed_count()
    ));
    timeline.push(stage.finish());

    // Normalize
    let mut stage = StageRecorder::begin(Stage::Normalize);
    let mut cleaned = raw.clone();
    normalize_dataset(&mut cleaned, &registry, &mut log);
    let counters = log.counters();
    stage.ok(format!("Phone formats normalized: {}", counters.phones_normalized));
    stage.ok(format!("Date formats normalized: {}", counters.dates_normalized));
    stage.ok(format!("Name casing fixed: {}", counters.names_normalized));
    stage.ok(format!("Email casing fixed: {}", counters.emails_normalized));
    stage.ok(format!("Status casing fixed: {}", counters.statuses_normalized));
    stage.event(
        format!("Invalid dates flagged: {}", counters.dates_flagged),
        counters.dates_flagged == 0,
    );
    timeline.push(stage.finish());

    // Validate (pre-clean)
    let mut stage = StageRecorder::begin(Stage::ValidatePre);
    let pre_validation = if options.pre_validation {
        let report = validate_dataset(&raw, &registry, &RuleSet::pre_clean(options.as_of));
        stage.event(
            format!("{}/{total} rows passed before cleaning", report.passed_count()),
            report.failed_count() == 0,
        );
        Some(report)
    } else {
        stage.ok("Pre-clean validation disabled");
        None
    };
    timeline.push(stage.finish());

    // Fill missing
    let mut stage = StageRecorder::begin(Stage::FillMissing);
    fill_missing(&mut cleaned, &registry, &mut log);
    for (field, value, _) in registry.fill_policies() {
        let count = log.counters().filled_for(field);
        if count > 0 {
            stage.ok(format!("{field}: {count} value(s) filled with '{value}'"));
        }
    }
    stage.ok(format!(
        "Missing values filled: {}",
        log.counters().filled_total()
    ));
    timeline.push(stage.finish());

    // Validate (post-clean)
    let mut stage = StageRecorder::begin(Stage::ValidatePost);
    let post_validation =
        validate_dataset(&cleaned, &registry, &RuleSet::post_clean(options.as_of));
    if post_validation.failed_count() == 0 {
        stage.ok(format!("All {total} rows passed validation"));
    } else {
        stage.fail(format!(
            "{}/{total} rows passed, {} failed",
            post_validation.passed_count(),
            post_validation.failed_count()
        ));
    }
    for field in Field::ALL {
        let failing = post_validation.rows_failing(field).len();
        stage.event(
            format!("{field}: {}/{total} valid", total - failing),
            failing == 0,
        );
    }
    let critical_columns = critical_failures(&post_validation);
    if critical_columns.is_empty() {
        stage.ok("No critical validation failures");
    } else {
        warn!(failures = ?critical_columns, "critical validation failures");
        stage.fail("Critical validation failures detected - continuing with warnings");
    }
    timeline.push(stage.finish());

    // Detect PII
    let mut stage = StageRecorder::begin(Stage::DetectPii);
    let pii_cleaned = detect_pii(&cleaned, &registry);
    for field in DETECTED_FIELDS {
        let count = pii_cleaned.detected(field).len();
        stage.ok(format!(
            "Found PII - {field}: {count}/{total} rows ({}%)",
            percent(count, total)
        ));
    }
    timeline.push(stage.finish());

    // Mask
    let mut stage = StageRecorder::begin(Stage::Mask);
    let masked = mask_dataset(&cleaned, &registry, &mut log);
    for field in registry.masked_fields() {
        stage.ok(format!(
            "{field} masked ({})",
            registry.rule(field).mask.description()
        ));
    }
    stage.ok(format!("{} cell(s) masked", log.counters().masked));
    timeline.push(stage.finish());

    debug_assert_eq!(cleaned.len(), total);
    debug_assert_eq!(masked.len(), total);
    info!(
        rows = total,
        actions = log.len(),
        passed = post_validation.passed_count(),
        failed = post_validation.failed_count(),
        duration_ms = timeline.elapsed().as_millis(),
        "pipeline complete"
    );

    PipelineRun {
        options: *options,
        registry,
        raw,
        cleaned,
        masked,
        log,
        profile,
        pii,
        pii_cleaned,
        pre_validation,
        post_validation,
        critical_failures: critical_columns,
        timeline,
    }
}

fn percent(count: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        ((count as f64 / total as f64) * 100.0).round() as usize
    }
}
