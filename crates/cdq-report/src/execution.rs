//! Pipeline execution report.

use std::time::Duration;

use cdq_core::{PipelineRun, StageRecord};
use cdq_model::Field;
use cdq_validate::DETECTED_FIELDS;

use crate::common::Lines;

/// Renders `pipeline_execution_report.txt`.
///
/// `extra` holds stages recorded after the run itself (saving outputs);
/// `files` lists the output file names.
pub fn render_execution_report(
    run: &PipelineRun,
    extra: &[StageRecord],
    duration: Duration,
    files: &[String],
) -> Vec<String> {
    let total = run.total_rows();
    let counters = run.log.counters();
    let post = &run.post_validation;

    let mut lines = Lines::titled("PIPELINE EXECUTION REPORT");
    lines.push(format!(
        "Timestamp: {}",
        run.timeline.started_at.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(format!("Duration:  {:.2} seconds", duration.as_secs_f64()));
    lines.push(format!("As of:     {}", run.options.as_of));
    lines.blank();

    for (idx, record) in run.timeline.stages().iter().chain(extra).enumerate() {
        lines.push(format!("Stage {}: {}", idx + 1, record.stage.label()));
        for event in &record.events {
            let icon = if event.ok { "[OK]" } else { "[FAIL]" };
            lines.push(format!("  {icon} {}", event.message));
        }
        lines.blank();
    }

    lines.banner("SUMMARY:");
    lines.push(format!("  Input:    {total} rows"));
    lines.push(format!(
        "  Output:   customers_cleaned.csv + customers_masked.csv ({} rows)",
        run.cleaned.len()
    ));
    lines.blank();
    lines.push("  Cleaning:");
    lines.push(format!("    - {} phone(s) normalized", counters.phones_normalized));
    lines.push(format!("    - {} date(s) normalized", counters.dates_normalized));
    lines.push(format!("    - {} date(s) flagged invalid", counters.dates_flagged));
    lines.push(format!("    - {} name(s) title-cased", counters.names_normalized));
    lines.push(format!("    - {} email(s) lowercased", counters.emails_normalized));
    lines.push(format!("    - {} status(es) lowercased", counters.statuses_normalized));
    lines.push(format!("    - {} missing value(s) filled", counters.filled_total()));
    lines.blank();
    lines.push("  Validation:");
    if let Some(pre) = &run.pre_validation {
        lines.push(format!(
            "    - {}/{total} rows passed before cleaning",
            pre.passed_count()
        ));
    }
    lines.push(format!(
        "    - {}/{total} rows passed all checks after cleaning",
        post.passed_count()
    ));
    lines.push(format!(
        "    - {} individual column failure(s) remaining",
        post.failure_count()
    ));
    lines.blank();
    lines.push("  PII Detection:");
    for field in DETECTED_FIELDS {
        lines.push(format!(
            "    - {} {field} value(s) detected",
            run.pii_cleaned.detected(field).len()
        ));
    }
    lines.blank();
    let masked: Vec<&str> = run.registry.masked_fields().map(Field::column_name).collect();
    let kept: Vec<&str> = Field::ALL
        .into_iter()
        .filter(|field| !masked.contains(&field.column_name()))
        .map(Field::column_name)
        .collect();
    lines.push("  PII Masking:");
    lines.push(format!("    - {} -> masked", masked.join(", ")));
    lines.push(format!("    - {} -> preserved", kept.join(", ")));
    lines.blank();
    let quality = if post.failed_count() == 0 {
        "PASS".to_string()
    } else {
        format!("REVIEW ({} row(s) flagged)", post.failed_count())
    };
    lines.push(format!("  Quality:  {quality}"));
    lines.push("  PII Risk: MITIGATED");
    lines.blank();
    if !files.is_empty() {
        lines.push("  Files saved:");
        for file in files {
            lines.push(format!("    - {file}"));
        }
        lines.blank();
    }
    let status = if run.has_critical_failures() {
        "COMPLETED WITH WARNINGS"
    } else {
        "SUCCESS"
    };
    lines.push(format!("Status: {status}"));
    lines.finish()
}
