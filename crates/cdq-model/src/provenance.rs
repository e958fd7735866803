#![deny(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// What kind of mutation an action log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    /// Deterministic format repair (casing, delimiters, date re-rendering).
    Normalized,
    /// No repair exists; the value was replaced by a sentinel.
    Flagged,
    /// Empty value replaced by the column's fill policy.
    Filled,
    /// Cleaned value redacted in the masked table.
    Masked,
}

impl ActionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normalized => "normalized",
            Self::Flagged => "flagged",
            Self::Filled => "filled",
            Self::Masked => "masked",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observable mutation of one cell. Entries are never edited after they are logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub category: ActionCategory,
    pub field: Field,
    /// Row number within the input (1-based, excluding header).
    pub row: usize,
    pub before: String,
    pub after: String,
}

impl ActionLogEntry {
    pub fn new(
        category: ActionCategory,
        field: Field,
        row: usize,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        Self {
            category,
            field,
            row,
            before: before.into(),
            after: after.into(),
        }
    }

    /// Human-readable label for reports, e.g. `Name case (first_name)`.
    pub fn label(&self) -> String {
        match (self.category, self.field) {
            (ActionCategory::Normalized, Field::Phone) => "Phone normalization".to_string(),
            (ActionCategory::Normalized, Field::Email) => "Email lowercase".to_string(),
            (ActionCategory::Normalized, Field::AccountStatus) => {
                "Status normalization".to_string()
            }
            (ActionCategory::Normalized, field) if field.is_name() => {
                format!("Name case ({field})")
            }
            (ActionCategory::Normalized, field) if field.is_date() => {
                format!("Date normalization ({field})")
            }
            (ActionCategory::Normalized, field) => format!("Normalization ({field})"),
            (ActionCategory::Flagged, field) => format!("Invalid date flagged ({field})"),
            (ActionCategory::Filled, field) => format!("Missing value filled ({field})"),
            (ActionCategory::Masked, field) => format!("Masked ({field})"),
        }
    }

    /// Detail line, e.g. `Row 3: 'JOHN' -> 'John'`.
    pub fn detail(&self) -> String {
        if self.category == ActionCategory::Filled {
            format!("Row {}: empty -> '{}'", self.row, self.after)
        } else {
            format!("Row {}: '{}' -> '{}'", self.row, self.before, self.after)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_category_and_field() {
        let entry = ActionLogEntry::new(ActionCategory::Normalized, Field::FirstName, 1, "JO", "Jo");
        assert_eq!(entry.label(), "Name case (first_name)");
        assert_eq!(entry.detail(), "Row 1: 'JO' -> 'Jo'");

        let flagged = ActionLogEntry::new(
            ActionCategory::Flagged,
            Field::CreatedDate,
            4,
            "invalid_date",
            "[INVALID_DATE]",
        );
        assert_eq!(flagged.label(), "Invalid date flagged (created_date)");

        let filled = ActionLogEntry::new(ActionCategory::Filled, Field::Income, 2, "", "0");
        assert_eq!(filled.detail(), "Row 2: empty -> '0'");
    }
}
