//! Missing-value fill policy.

use cdq_model::{Field, RuleRegistry, is_missing};

/// Result of applying a column's fill policy to one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub value: String,
    /// True when the value was missing and a fill value replaced it.
    pub applied: bool,
}

/// Fills `value` if it is missing and `field` has a fill policy.
///
/// Columns without a policy (and all non-missing values) pass through.
/// Dates have no fill policy; unparseable dates are handled by the date
/// normalizer instead.
pub fn resolve(registry: &RuleRegistry, field: Field, value: &str) -> Resolution {
    match registry.rule(field).missing.fill_value() {
        Some(fill) if is_missing(value) => Resolution {
            value: fill.to_string(),
            applied: true,
        },
        _ => Resolution {
            value: value.to_string(),
            applied: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_only_columns_with_policy() {
        let registry = RuleRegistry::standard();
        assert_eq!(resolve(&registry, Field::Income, " ").value, "0");
        assert_eq!(resolve(&registry, Field::AccountStatus, "").value, "unknown");
        assert_eq!(resolve(&registry, Field::Address, "").value, "[UNKNOWN]");
        assert_eq!(resolve(&registry, Field::FirstName, "").value, "[UNKNOWN]");

        let email = resolve(&registry, Field::Email, "");
        assert_eq!(email.value, "");
        assert!(!email.applied);

        let dob = resolve(&registry, Field::DateOfBirth, "");
        assert!(!dob.applied);
    }

    #[test]
    fn present_values_are_kept() {
        let registry = RuleRegistry::standard();
        let income = resolve(&registry, Field::Income, "52000");
        assert_eq!(income.value, "52000");
        assert!(!income.applied);
    }
}
