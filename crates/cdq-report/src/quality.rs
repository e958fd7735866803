//! Quality profile report.

use cdq_model::Field;
use cdq_transform::DateFormat;
use cdq_validate::{QualityIssue, QualityProfile, Severity};

use crate::common::{Lines, percent};

const IMPACT_COLUMNS: [Field; 5] = [
    Field::FirstName,
    Field::LastName,
    Field::Address,
    Field::Income,
    Field::AccountStatus,
];

/// Renders `data_quality_report.txt`.
pub fn render_quality_report(profile: &QualityProfile) -> Vec<String> {
    let total = profile.total_rows;
    let mut lines = Lines::titled("DATA QUALITY PROFILE REPORT");
    lines.push(format!("Rows profiled: {total}"));
    lines.blank();

    lines.section("COMPLETENESS:");
    for column in &profile.completeness {
        let status = if column.missing == 0 {
            "OK".to_string()
        } else {
            format!("{} missing", column.missing)
        };
        lines.push(format!(
            "  - {}: {}%  {status}",
            column.field, column.percent_complete
        ));
    }
    lines.blank();

    lines.section("DATA TYPES (expected, conformance):");
    for conformance in &profile.types {
        let verdict = if conformance.conforms {
            "all values conform"
        } else {
            "non-conforming values present"
        };
        lines.push(format!(
            "  - {}: {} ({verdict})",
            conformance.field,
            conformance.expected.label()
        ));
    }
    lines.blank();

    lines.section("QUALITY ISSUES:");
    let mut issues: Vec<&QualityIssue> = profile.issues.iter().collect();
    issues.sort_by_key(|issue| issue.severity());
    if issues.is_empty() {
        lines.push("  No issues found");
    }
    for (idx, issue) in issues.iter().enumerate() {
        lines.push(format!(
            "{}. [{}] {}",
            idx + 1,
            issue.severity().label(),
            issue.description()
        ));
        lines.push(format!("   -> {}", issue.detail()));
    }
    lines.blank();

    lines.section("UNIQUENESS CHECK:");
    if profile.duplicate_ids.is_empty() {
        lines.push(format!(
            "  - customer_id: all {} values are unique",
            profile.distinct_ids
        ));
    } else {
        lines.push(format!(
            "  - customer_id: DUPLICATES FOUND ({})",
            profile.duplicate_ids.join(", ")
        ));
    }
    lines.blank();

    lines.section("PHONE FORMAT BREAKDOWN:");
    for (shape, count) in &profile.phone_shapes {
        lines.push(format!("  - {}: {count} row(s)", shape.label()));
    }
    lines.blank();

    lines.section("DATE FORMAT BREAKDOWN:");
    for (field, samples) in &profile.date_samples {
        lines.push(format!("  {field}:"));
        for sample in samples {
            let format = sample.format.map_or("Unknown/Invalid", DateFormat::label);
            lines.push(format!(
                "    Row {}: '{}' -> {format}",
                sample.row, sample.value
            ));
        }
    }
    lines.blank();

    lines.section("SEVERITY SUMMARY:");
    for severity in Severity::ALL {
        lines.push(format!(
            "  - {:<8} ({}): {} issue(s)",
            severity.label(),
            severity.meaning(),
            profile.severity_count(severity)
        ));
    }
    lines.blank();

    lines.section("ESTIMATED IMPACT:");
    for field in IMPACT_COLUMNS {
        let missing = profile.completeness_of(field).map_or(0, |c| c.missing);
        lines.push(format!(
            "  - {missing} row(s) missing {field} = {}% incomplete",
            percent(missing, total)
        ));
    }
    lines.push(format!(
        "  - {} row(s) with invalid dates (cannot be processed)",
        profile.rows_with_invalid_dates()
    ));
    lines.push(format!(
        "  - {} row(s) with non-standard phone formats (need normalization)",
        count_issues(profile, |i| matches!(i, QualityIssue::NonStandardPhone { .. }))
    ));
    lines.push(format!(
        "  - {} value(s) with non-standard date formats",
        count_issues(profile, |i| matches!(i, QualityIssue::NonStandardDate { .. }))
    ));
    lines.push(format!(
        "  - {} row(s) with uppercase email",
        count_issues(profile, |i| matches!(i, QualityIssue::EmailNotLowercase { .. }))
    ));
    lines.blank();
    lines.finish()
}

fn count_issues(profile: &QualityProfile, predicate: impl Fn(&QualityIssue) -> bool) -> usize {
    profile.issues.iter().filter(|issue| predicate(issue)).count()
}
