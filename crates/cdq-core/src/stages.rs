//! The mutating stages. Every cell they change is recorded in the
//! [`ActionLog`]; none of them adds or drops rows.

use std::collections::BTreeMap;

use cdq_model::{
    ActionCategory, ActionLogEntry, Dataset, Field, RuleRegistry, ValidationReport,
};
use cdq_transform::{NormalizeOutcome, mask, normalize, resolve};

use crate::provenance::ActionLog;

/// Columns whose post-clean failures trigger the critical-failure warning.
pub const CRITICAL_FIELDS: [Field; 3] = [Field::Email, Field::Phone, Field::AccountStatus];

/// Runs each column's normalizer over every row in place.
pub fn normalize_dataset(dataset: &mut Dataset, registry: &RuleRegistry, log: &mut ActionLog) {
    for (idx, record) in dataset.records.iter_mut().enumerate() {
        let row = idx + 1;
        for rule in registry.iter() {
            let result = normalize(rule.normalizer, record.get(rule.field));
            let category = match result.outcome {
                NormalizeOutcome::Unchanged => continue,
                NormalizeOutcome::Normalized => ActionCategory::Normalized,
                NormalizeOutcome::Flagged => ActionCategory::Flagged,
            };
            let after = result.value;
            let before = record.set(rule.field, after.clone());
            log.record(ActionLogEntry::new(category, rule.field, row, before, after));
        }
    }
}

/// Applies each column's fill policy to missing values in place.
pub fn fill_missing(dataset: &mut Dataset, registry: &RuleRegistry, log: &mut ActionLog) {
    for (idx, record) in dataset.records.iter_mut().enumerate() {
        let row = idx + 1;
        for (field, _, _) in registry.fill_policies() {
            let resolution = resolve(registry, field, record.get(field));
            if !resolution.applied {
                continue;
            }
            let after = resolution.value;
            let before = record.set(field, after.clone());
            log.record(ActionLogEntry::new(ActionCategory::Filled, field, row, before, after));
        }
    }
}

/// Derives the masked table from the cleaned one.
pub fn mask_dataset(cleaned: &Dataset, registry: &RuleRegistry, log: &mut ActionLog) -> Dataset {
    let mut masked = cleaned.clone();
    for (idx, record) in masked.records.iter_mut().enumerate() {
        let row = idx + 1;
        for field in registry.masked_fields() {
            let after = mask(registry.rule(field).mask, record.get(field));
            if after == record.get(field) {
                continue;
            }
            let before = record.set(field, after.clone());
            log.record(ActionLogEntry::new(ActionCategory::Masked, field, row, before, after));
        }
    }
    masked
}

/// Rows failing on each critical column, omitting clean columns.
pub fn critical_failures(report: &ValidationReport) -> BTreeMap<Field, Vec<usize>> {
    CRITICAL_FIELDS
        .into_iter()
        .map(|field| (field, report.rows_failing(field)))
        .filter(|(_, rows)| !rows.is_empty())
        .collect()
}
