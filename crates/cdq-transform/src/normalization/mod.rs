//! Per-field canonicalisation.
//!
//! - **phone**: digit extraction and `DDD-DDD-DDDD` re-delimiting
//! - **datetime**: ordered source-format parsing, `YYYY-MM-DD` rendering
//! - **text**: name title-casing, email and status lowercasing
//!
//! Every normalizer is pure and idempotent: feeding its output back in
//! yields [`NormalizeOutcome::Unchanged`].

pub mod datetime;
pub mod phone;
pub mod text;

use cdq_model::NormalizerKind;

pub use datetime::{ACCEPTED_DATE_FORMATS, DateFormat, DateParse, normalize_date, parse_date};
pub use phone::{digits_only, normalize_phone};
pub use text::{normalize_email, normalize_name, normalize_status, title_case};

/// How a normalizer treated one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// Already canonical, empty, or not repairable without inventing data.
    Unchanged,
    /// Deterministically repaired.
    Normalized,
    /// No repair exists; replaced by a sentinel.
    Flagged,
}

/// A normalized value plus how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    pub value: String,
    pub outcome: NormalizeOutcome,
}

impl Normalization {
    pub fn unchanged(raw: &str) -> Self {
        Self {
            value: raw.to_string(),
            outcome: NormalizeOutcome::Unchanged,
        }
    }

    /// Compares `canonical` against the trimmed input to pick the outcome.
    pub(crate) fn compare(raw: &str, canonical: String) -> Self {
        if canonical == raw.trim() {
            Self::unchanged(raw)
        } else {
            Self {
                value: canonical,
                outcome: NormalizeOutcome::Normalized,
            }
        }
    }

    pub fn changed(&self) -> bool {
        self.outcome != NormalizeOutcome::Unchanged
    }
}

/// Applies the normalizer selected by `kind` to `raw`.
///
/// Empty input is never changed.
pub fn normalize(kind: NormalizerKind, raw: &str) -> Normalization {
    if raw.trim().is_empty() {
        return Normalization::unchanged(raw);
    }
    match kind {
        NormalizerKind::Phone => normalize_phone(raw),
        NormalizerKind::Date => normalize_date(raw),
        NormalizerKind::Name => normalize_name(raw),
        NormalizerKind::Email => normalize_email(raw),
        NormalizerKind::Status => normalize_status(raw),
        NormalizerKind::Passthrough => Normalization::unchanged(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_never_changed() {
        for kind in [
            NormalizerKind::Phone,
            NormalizerKind::Date,
            NormalizerKind::Name,
            NormalizerKind::Email,
            NormalizerKind::Status,
        ] {
            let result = normalize(kind, "  ");
            assert_eq!(result.outcome, NormalizeOutcome::Unchanged, "{kind:?}");
            assert!(!result.changed());
        }
    }

    #[test]
    fn passthrough_keeps_value() {
        let result = normalize(NormalizerKind::Passthrough, "12 Main St");
        assert_eq!(result, Normalization::unchanged("12 Main St"));
    }

    #[test]
    fn dispatch_selects_field_normalizer() {
        assert_eq!(normalize(NormalizerKind::Email, "A@B.CO").value, "a@b.co");
        assert_eq!(normalize(NormalizerKind::Status, "ACTIVE").value, "active");
        assert_eq!(normalize(NormalizerKind::Name, "mary-jane").value, "Mary-Jane");
        assert_eq!(
            normalize(NormalizerKind::Phone, "555.123.4567").value,
            "555-123-4567"
        );
        assert_eq!(
            normalize(NormalizerKind::Date, "03/15/1985").value,
            "1985-03-15"
        );
    }
}
