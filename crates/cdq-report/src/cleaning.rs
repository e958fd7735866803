//! Cleaning log report.

use cdq_core::PipelineRun;
use cdq_model::{ActionCategory, Field};

use crate::common::{Lines, row_list};

/// Renders `cleaning_log.txt`. Masking entries are not part of it.
pub fn render_cleaning_log(run: &PipelineRun) -> Vec<String> {
    let counters = run.log.counters();
    let mut lines = Lines::titled("DATA CLEANING LOG");

    lines.section("ACTIONS TAKEN:");
    lines.blank();
    lines.push("Normalization:");
    for entry in run.log.by_category(ActionCategory::Normalized) {
        lines.push(format!("  [{}] {}", entry.label(), entry.detail()));
    }
    lines.blank();
    lines.push("  Summary:");
    lines.push(format!("  - Phone formats normalized:  {}", counters.phones_normalized));
    lines.push(format!("  - Date formats normalized:   {}", counters.dates_normalized));
    lines.push(format!("  - Name casing fixed:         {}", counters.names_normalized));
    lines.push(format!("  - Email casing fixed:        {}", counters.emails_normalized));
    lines.push(format!("  - Status casing fixed:       {}", counters.statuses_normalized));
    lines.blank();

    lines.push("Invalid dates flagged:");
    let mut flagged = run.log.by_category(ActionCategory::Flagged).peekable();
    if flagged.peek().is_none() {
        lines.push("  None");
    }
    for entry in flagged {
        lines.push(format!("  [{}] {}", entry.label(), entry.detail()));
    }
    lines.blank();

    lines.push("Missing Values:");
    lines.push("  Strategy used:");
    for (field, value, rationale) in run.registry.fill_policies() {
        let fill = format!("'{value}'");
        lines.push(format!(
            "    {:<15} -> {fill:<12} ({rationale})",
            field.column_name()
        ));
    }
    lines.blank();
    for (field, value, _) in run.registry.fill_policies() {
        let count = counters.filled_for(field);
        if count > 0 {
            lines.push(format!("  - {field}: {count} row(s) filled with '{value}'"));
        }
    }
    lines.push(format!(
        "  - Total missing values filled: {}",
        counters.filled_total()
    ));
    lines.blank();

    lines.banner("VALIDATION COMPARISON:");
    let post = &run.post_validation;
    match &run.pre_validation {
        Some(pre) => lines.push(format!(
            "  Before cleaning: {} passed, {} failed",
            pre.passed_count(),
            pre.failed_count()
        )),
        None => lines.push("  Before cleaning: not run"),
    }
    lines.push(format!(
        "  After cleaning:  {} passed, {} failed",
        post.passed_count(),
        post.failed_count()
    ));
    if post.failed_count() == 0 {
        lines.push("  Status: NO ISSUES REMAINING");
    } else {
        lines.push(format!(
            "  Status: {} row(s) still have issues (rows: {})",
            post.failed_count(),
            row_list(&post.failed_rows())
        ));
        if counters.dates_flagged > 0 {
            lines.push("  Note: Rows with [INVALID_DATE] are flagged for human review");
        }
    }
    lines.blank();

    lines.banner("COMPLETE ACTION LOG (all changes):");
    for (idx, entry) in run.log.cleaning_entries().enumerate() {
        lines.push(format!(
            "  {:>2}. [{}] {}",
            idx + 1,
            entry.label(),
            entry.detail()
        ));
    }
    lines.blank();
    lines.push(format!(
        "Output: customers_cleaned.csv ({} rows, {} columns)",
        run.cleaned.len(),
        Field::ALL.len()
    ));
    lines.finish()
}
