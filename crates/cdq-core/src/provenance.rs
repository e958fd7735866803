//! Audit trail for every cell the pipeline mutates.
//!
//! [`ActionLog`] is the accumulator passed through the stages and handed
//! back inside the run result. Entries are append-only; the per-kind
//! counters are derived as entries arrive so they always agree with the log.

use std::collections::BTreeMap;

use cdq_model::{ActionCategory, ActionLogEntry, Field};

/// Aggregate counts of cleaning actions, per field kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningCounters {
    pub phones_normalized: usize,
    /// Date cells re-rendered as `YYYY-MM-DD`.
    pub dates_normalized: usize,
    pub names_normalized: usize,
    pub emails_normalized: usize,
    pub statuses_normalized: usize,
    /// Date cells replaced by the invalid-date sentinel.
    pub dates_flagged: usize,
    pub filled: BTreeMap<Field, usize>,
    pub masked: usize,
}

impl CleaningCounters {
    fn count(&mut self, entry: &ActionLogEntry) {
        match entry.category {
            ActionCategory::Normalized => match entry.field {
                Field::Phone => self.phones_normalized += 1,
                Field::Email => self.emails_normalized += 1,
                Field::AccountStatus => self.statuses_normalized += 1,
                field if field.is_name() => self.names_normalized += 1,
                field if field.is_date() => self.dates_normalized += 1,
                _ => {}
            },
            ActionCategory::Flagged => self.dates_flagged += 1,
            ActionCategory::Filled => *self.filled.entry(entry.field).or_default() += 1,
            ActionCategory::Masked => self.masked += 1,
        }
    }

    pub fn normalized_total(&self) -> usize {
        self.phones_normalized
            + self.dates_normalized
            + self.names_normalized
            + self.emails_normalized
            + self.statuses_normalized
    }

    pub fn filled_total(&self) -> usize {
        self.filled.values().sum()
    }

    pub fn filled_for(&self, field: Field) -> usize {
        self.filled.get(&field).copied().unwrap_or(0)
    }
}

/// Append-only log of cell mutations plus their running counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLog {
    entries: Vec<ActionLogEntry>,
    counters: CleaningCounters,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: ActionLogEntry) {
        self.counters.count(&entry);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ActionLogEntry] {
        &self.entries
    }

    pub fn counters(&self) -> &CleaningCounters {
        &self.counters
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn by_category(&self, category: ActionCategory) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Everything except masking, in the order it happened.
    pub fn cleaning_entries(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.category != ActionCategory::Masked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_follow_entries() {
        let mut log = ActionLog::new();
        log.record(ActionLogEntry::new(
            ActionCategory::Normalized,
            Field::Phone,
            1,
            "(555) 123-4567",
            "555-123-4567",
        ));
        log.record(ActionLogEntry::new(
            ActionCategory::Normalized,
            Field::CreatedDate,
            1,
            "2024/01/31",
            "2024-01-31",
        ));
        log.record(ActionLogEntry::new(
            ActionCategory::Flagged,
            Field::DateOfBirth,
            2,
            "13/45/2024",
            "[INVALID_DATE]",
        ));
        log.record(ActionLogEntry::new(ActionCategory::Filled, Field::Income, 2, "", "0"));
        log.record(ActionLogEntry::new(ActionCategory::Filled, Field::Income, 3, "", "0"));
        log.record(ActionLogEntry::new(
            ActionCategory::Masked,
            Field::FirstName,
            1,
            "John",
            "J***",
        ));

        let counters = log.counters();
        assert_eq!(counters.phones_normalized, 1);
        assert_eq!(counters.dates_normalized, 1);
        assert_eq!(counters.dates_flagged, 1);
        assert_eq!(counters.normalized_total(), 2);
        assert_eq!(counters.filled_for(Field::Income), 2);
        assert_eq!(counters.filled_for(Field::Address), 0);
        assert_eq!(counters.masked, 1);

        assert_eq!(log.len(), 6);
        assert_eq!(log.cleaning_entries().count(), 5);
        assert_eq!(log.by_category(ActionCategory::Filled).count(), 2);
        assert_eq!(log.entries()[0].row, 1);
    }
}
