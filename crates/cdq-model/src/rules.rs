//! Declarative per-column rules.
//!
//! Every column gets exactly one [`FieldRule`] naming its normalizer,
//! validator, missing-value policy, mask, and PII classification. The
//! implementations live in `cdq-transform` and `cdq-validate`; this table
//! only says which one applies where. The registry is fixed at compile time.

use crate::field::{Field, STATUS_UNKNOWN, UNKNOWN_PLACEHOLDER};

/// Canonicalisation applied during the Normalize stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizerKind {
    Phone,
    Date,
    Name,
    Email,
    Status,
    /// Value is carried through untouched.
    Passthrough,
}

impl NormalizerKind {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Phone => "Phone (XXX-XXX-XXXX)",
            Self::Date => "Date (YYYY-MM-DD)",
            Self::Name => "Title case",
            Self::Email => "Lowercase",
            Self::Status => "Lowercase",
            Self::Passthrough => "-",
        }
    }
}

/// Predicate applied during both validation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    CustomerId,
    Name,
    Email,
    Phone,
    /// Date shape plus the pre-clean age bounds.
    DateOfBirth,
    Date,
    Address,
    Income,
    AccountStatus,
}

impl ValidatorKind {
    pub fn description(self) -> &'static str {
        match self {
            Self::CustomerId => "Unique, positive integer",
            Self::Name => "2-50 letters, hyphen or apostrophe, or [UNKNOWN]",
            Self::Email => "Valid format: something@domain.tld",
            Self::Phone => "Standard format: XXX-XXX-XXXX",
            Self::DateOfBirth => "YYYY-MM-DD, age between 18-120 (pre-clean)",
            Self::Date => "YYYY-MM-DD",
            Self::Address => "10-200 chars, or [UNKNOWN]",
            Self::Income => "Non-negative number, <= 10,000,000",
            Self::AccountStatus => "One of: active, inactive, suspended (+ unknown post-clean)",
        }
    }
}

/// What happens to an empty value during the Fill-missing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    Fill {
        value: &'static str,
        rationale: &'static str,
    },
    /// No policy; the value stays empty and surfaces during validation.
    Leave,
}

impl MissingPolicy {
    pub fn fill_value(self) -> Option<&'static str> {
        match self {
            Self::Fill { value, .. } => Some(value),
            Self::Leave => None,
        }
    }
}

/// Redaction applied during the Mask stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskKind {
    Name,
    Email,
    Phone,
    Address,
    DateOfBirth,
    /// Business data; never masked.
    Keep,
}

impl MaskKind {
    pub fn description(self) -> &'static str {
        match self {
            Self::Name => "First letter only",
            Self::Email => "Local part hidden, domain kept",
            Self::Phone => "Last 4 digits kept",
            Self::Address => "Fully replaced",
            Self::DateOfBirth => "Year kept, month/day hidden",
            Self::Keep => "Not masked (business data)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PiiRisk {
    High,
    Medium,
    Low,
}

impl PiiRisk {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiiClass {
    pub risk: PiiRisk,
    pub category: &'static str,
    pub rationale: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub normalizer: NormalizerKind,
    pub validator: ValidatorKind,
    pub missing: MissingPolicy,
    pub mask: MaskKind,
    pub pii: Option<PiiClass>,
}

const PLACEHOLDER_FILL: MissingPolicy = MissingPolicy::Fill {
    value: UNKNOWN_PLACEHOLDER,
    rationale: "can't delete row, need placeholder",
};

const NAME_PII: PiiClass = PiiClass {
    risk: PiiRisk::High,
    category: "Direct Identifier",
    rationale: "Identifies the individual by name",
};

const STANDARD_RULES: [FieldRule; 10] = [
    FieldRule {
        field: Field::CustomerId,
        normalizer: NormalizerKind::Passthrough,
        validator: ValidatorKind::CustomerId,
        missing: MissingPolicy::Leave,
        mask: MaskKind::Keep,
        pii: Some(PiiClass {
            risk: PiiRisk::Low,
            category: "Internal Identifier",
            rationale: "Alone it's harmless, but links all other PII together",
        }),
    },
    FieldRule {
        field: Field::FirstName,
        normalizer: NormalizerKind::Name,
        validator: ValidatorKind::Name,
        missing: PLACEHOLDER_FILL,
        mask: MaskKind::Name,
        pii: Some(NAME_PII),
    },
    FieldRule {
        field: Field::LastName,
        normalizer: NormalizerKind::Name,
        validator: ValidatorKind::Name,
        missing: PLACEHOLDER_FILL,
        mask: MaskKind::Name,
        pii: Some(NAME_PII),
    },
    FieldRule {
        field: Field::Email,
        normalizer: NormalizerKind::Email,
        validator: ValidatorKind::Email,
        missing: MissingPolicy::Leave,
        mask: MaskKind::Email,
        pii: Some(PiiClass {
            risk: PiiRisk::High,
            category: "Contact Information",
            rationale: "Uniquely links to a person, enables phishing",
        }),
    },
    FieldRule {
        field: Field::Phone,
        normalizer: NormalizerKind::Phone,
        validator: ValidatorKind::Phone,
        missing: MissingPolicy::Leave,
        mask: MaskKind::Phone,
        pii: Some(PiiClass {
            risk: PiiRisk::High,
            category: "Contact Information",
            rationale: "Direct contact vector, enables social engineering",
        }),
    },
    FieldRule {
        field: Field::DateOfBirth,
        normalizer: NormalizerKind::Date,
        validator: ValidatorKind::DateOfBirth,
        missing: MissingPolicy::Leave,
        mask: MaskKind::DateOfBirth,
        pii: Some(PiiClass {
            risk: PiiRisk::High,
            category: "Sensitive Personal",
            rationale: "Used for identity verification + fraud",
        }),
    },
    FieldRule {
        field: Field::Address,
        normalizer: NormalizerKind::Passthrough,
        validator: ValidatorKind::Address,
        missing: PLACEHOLDER_FILL,
        mask: MaskKind::Address,
        pii: Some(PiiClass {
            risk: PiiRisk::High,
            category: "Sensitive Personal",
            rationale: "Physical location, enables stalking or mail fraud",
        }),
    },
    FieldRule {
        field: Field::Income,
        normalizer: NormalizerKind::Passthrough,
        validator: ValidatorKind::Income,
        missing: MissingPolicy::Fill {
            value: "0",
            rationale: "safest financial default, flag for review",
        },
        mask: MaskKind::Keep,
        pii: Some(PiiClass {
            risk: PiiRisk::Medium,
            category: "Financial Sensitivity",
            rationale: "Reveals wealth, enables targeted fraud",
        }),
    },
    FieldRule {
        field: Field::AccountStatus,
        normalizer: NormalizerKind::Status,
        validator: ValidatorKind::AccountStatus,
        missing: MissingPolicy::Fill {
            value: STATUS_UNKNOWN,
            rationale: "can't assume; flag for human review",
        },
        mask: MaskKind::Keep,
        pii: None,
    },
    FieldRule {
        field: Field::CreatedDate,
        normalizer: NormalizerKind::Date,
        validator: ValidatorKind::Date,
        missing: MissingPolicy::Leave,
        mask: MaskKind::Keep,
        pii: None,
    },
];

/// The per-column rule table, indexed by [`Field`].
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: [FieldRule; 10],
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleRegistry {
    /// The customer-table rule set.
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_RULES,
        }
    }

    pub fn rule(&self, field: Field) -> &FieldRule {
        &self.rules[field.index()]
    }

    /// Rules in column order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }

    /// Columns that carry a fill policy, in column order.
    pub fn fill_policies(&self) -> impl Iterator<Item = (Field, &'static str, &'static str)> + '_ {
        self.rules.iter().filter_map(|rule| match rule.missing {
            MissingPolicy::Fill { value, rationale } => Some((rule.field, value, rationale)),
            MissingPolicy::Leave => None,
        })
    }

    /// Columns that are redacted in the masked table.
    pub fn masked_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules
            .iter()
            .filter(|rule| rule.mask != MaskKind::Keep)
            .map(|rule| rule.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_indexed_by_field() {
        let registry = RuleRegistry::standard();
        for field in Field::ALL {
            assert_eq!(registry.rule(field).field, field);
        }
    }

    #[test]
    fn fill_policies_cover_documented_columns() {
        let registry = RuleRegistry::standard();
        let fills: Vec<(Field, &str)> = registry
            .fill_policies()
            .map(|(field, value, _)| (field, value))
            .collect();
        assert_eq!(
            fills,
            vec![
                (Field::FirstName, "[UNKNOWN]"),
                (Field::LastName, "[UNKNOWN]"),
                (Field::Address, "[UNKNOWN]"),
                (Field::Income, "0"),
                (Field::AccountStatus, "unknown"),
            ]
        );
    }

    #[test]
    fn business_columns_are_never_masked() {
        let registry = RuleRegistry::standard();
        let masked: Vec<Field> = registry.masked_fields().collect();
        for field in [
            Field::CustomerId,
            Field::Income,
            Field::AccountStatus,
            Field::CreatedDate,
        ] {
            assert!(!masked.contains(&field));
        }
        assert_eq!(masked.len(), 6);
    }
}
