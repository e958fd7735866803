//! Whole-record and whole-dataset validation.

use std::time::Instant;

use cdq_model::{
    Dataset, FieldFailure, Record, RuleRegistry, ValidationOutcome, ValidationReport,
};
use tracing::{debug, info, info_span};

use crate::checks::{CheckContext, IdIndex, check_value};
use crate::rule_set::RuleSet;

/// Runs every column predicate against one record. No predicate
/// short-circuits another.
pub fn validate_record(
    row: usize,
    record: &Record,
    registry: &RuleRegistry,
    ctx: CheckContext<'_>,
) -> ValidationOutcome {
    let failures = registry
        .iter()
        .filter_map(|rule| {
            check_value(rule.validator, record.get(rule.field), ctx)
                .err()
                .map(|reason| FieldFailure {
                    field: rule.field,
                    reason,
                })
        })
        .collect();
    ValidationOutcome {
        row,
        customer_id: record.customer_id.trim().to_string(),
        failures,
    }
}

/// Validates every row of `dataset` under `rules`.
///
/// The customer_id uniqueness index is built from the whole dataset first,
/// so every row sharing an id fails, not just the later ones.
pub fn validate_dataset(
    dataset: &Dataset,
    registry: &RuleRegistry,
    rules: &RuleSet,
) -> ValidationReport {
    let span = info_span!("validate", phase = rules.phase.label(), rows = dataset.len());
    let _guard = span.enter();
    let start = Instant::now();

    let ids = IdIndex::from_dataset(dataset);
    let ctx = CheckContext { rules, ids: &ids };
    let outcomes: Vec<ValidationOutcome> = dataset
        .rows()
        .map(|(row, record)| validate_record(row, record, registry, ctx))
        .collect();

    for outcome in outcomes.iter().filter(|o| !o.passed()) {
        let codes: Vec<&str> = outcome.failures.iter().map(|f| f.reason.code()).collect();
        debug!(row = outcome.row, failures = ?codes, "row failed validation");
    }

    let report = ValidationReport {
        phase: rules.phase,
        outcomes,
    };
    info!(
        phase = rules.phase.label(),
        passed = report.passed_count(),
        failed = report.failed_count(),
        failures = report.failure_count(),
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );
    report
}
