//! Validation results report.

use cdq_model::{Field, RuleRegistry, ValidationReport};

use crate::common::Lines;

/// Renders `validation_results.txt` for one validation pass.
pub fn render_validation_results(report: &ValidationReport, registry: &RuleRegistry) -> Vec<String> {
    let mut lines = Lines::titled("VALIDATION RESULTS");
    lines.push(format!("Rule set: {}", report.phase.label()));
    lines.blank();

    lines.push("SUMMARY:");
    lines.push(format!("  Total rows:                {}", report.total_rows()));
    lines.push(format!("  PASS (all checks):         {} rows", report.passed_count()));
    lines.push(format!("  FAIL (any check):          {} rows", report.failed_count()));
    lines.push(format!("  Total individual failures: {}", report.failure_count()));
    lines.blank();

    lines.banner("FAILURES BY COLUMN:");
    let by_field = report.failures_by_field();
    for field in Field::ALL {
        lines.blank();
        match by_field.get(&field) {
            None => lines.push(format!("{field}: OK - No failures")),
            Some(failures) => {
                lines.push(format!("{field}: FAIL - {} failure(s)", failures.len()));
                for (outcome, reason) in failures {
                    lines.push(format!(
                        "  - Row {} (customer_id={}): {reason}",
                        outcome.row, outcome.customer_id
                    ));
                }
            }
        }
    }
    lines.blank();

    lines.banner("VALIDATION RULES REFERENCE:");
    for rule in registry.iter() {
        lines.push(format!(
            "  {:<20} -> {}",
            rule.field.column_name(),
            rule.validator.description()
        ));
    }
    lines.blank();

    lines.section("ROW-BY-ROW PASS/FAIL:");
    for outcome in &report.outcomes {
        let status = if outcome.passed() {
            "PASS".to_string()
        } else {
            let fields: Vec<&str> = outcome
                .failures
                .iter()
                .map(|f| f.field.column_name())
                .collect();
            format!("FAIL ({})", fields.join(", "))
        };
        lines.push(format!(
            "  Row {} (customer_id={}): {status}",
            outcome.row, outcome.customer_id
        ));
    }
    lines.blank();
    lines.finish()
}
