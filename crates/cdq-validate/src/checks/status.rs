//! account_status: case-insensitive membership in the rule set's status list.

use cdq_model::FailureReason;

use crate::rule_set::RuleSet;

pub fn check(value: &str, rules: &RuleSet) -> Result<(), FailureReason> {
    if value.is_empty() {
        return Err(FailureReason::Empty);
    }
    let allowed = rules.allowed_statuses();
    if allowed.contains(&value.to_lowercase().as_str()) {
        return Ok(());
    }
    Err(FailureReason::InvalidStatus {
        value: value.to_string(),
        allowed: allowed.iter().map(|s| (*s).to_string()).collect(),
    })
}
