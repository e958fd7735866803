//! PII detection report.

use cdq_model::PiiRisk;
use cdq_validate::{DETECTED_FIELDS, PiiReport, detector_description};

use crate::common::{Lines, percent};

const SAMPLE_VALUES: usize = 3;

/// Renders `pii_detection_report.txt` from a scan of the raw table.
pub fn render_pii_report(report: &PiiReport) -> Vec<String> {
    let total = report.total_rows;
    let mut lines = Lines::titled("PII DETECTION REPORT");

    lines.section("RISK ASSESSMENT:");
    for (risk, heading) in [
        (PiiRisk::High, "HIGH RISK columns (direct or sensitive PII):"),
        (PiiRisk::Medium, "MEDIUM RISK columns (financial sensitivity):"),
        (PiiRisk::Low, "LOW RISK columns (no standalone PII):"),
    ] {
        lines.push(format!("  {heading}"));
        for (field, class) in report.columns_at_risk(risk) {
            lines.push(format!(
                "    - {field}: [{}] {}",
                class.category, class.rationale
            ));
        }
        lines.blank();
    }

    lines.section("DETECTED PII (by column):");
    for field in DETECTED_FIELDS {
        let count = report.detected(field).len();
        lines.push(format!(
            "  - {field}: {count}/{total} rows ({}%) contain PII",
            percent(count, total)
        ));
    }
    lines.blank();

    lines.section("SAMPLE DETECTED VALUES (first 3 per column):");
    for field in DETECTED_FIELDS {
        let samples: Vec<String> = report
            .detected(field)
            .iter()
            .take(SAMPLE_VALUES)
            .map(|d| format!("'{}' (row {})", d.value, d.row))
            .collect();
        let samples = if samples.is_empty() {
            "-".to_string()
        } else {
            samples.join(", ")
        };
        lines.push(format!("  {field}: {samples}"));
    }
    lines.blank();

    lines.section("PATTERNS USED FOR DETECTION:");
    for field in DETECTED_FIELDS {
        if let Some(description) = detector_description(field) {
            lines.push(format!("  {field}: {description}"));
        }
    }
    lines.blank();

    lines.section("EXPOSURE RISK ANALYSIS:");
    lines.push(format!(
        "  - Fully exposed rows (all 5 PII fields present): {}/{total}",
        report.fully_exposed_count()
    ));
    lines.push(format!(
        "  - Partially exposed rows (some PII present):     {}/{total}",
        report.partially_exposed_count()
    ));
    lines.blank();

    lines.section("PER-ROW EXPOSURE BREAKDOWN:");
    lines.push(format!(
        "  {:<6} {:<15} {:>12} {:>12}",
        "Row", "customer_id", "PII Fields", "Risk Level"
    ));
    lines.push(format!(
        "  {} {} {} {}",
        "-".repeat(6),
        "-".repeat(15),
        "-".repeat(12),
        "-".repeat(12)
    ));
    for exposure in &report.exposures {
        lines.push(format!(
            "  {:<6} {:<15} {:>12} {:>12}",
            exposure.row,
            exposure.customer_id,
            exposure.pii_fields,
            exposure.level().label()
        ));
    }
    lines.blank();

    lines.section("MITIGATION RECOMMENDATIONS:");
    lines.push("  1. MASK all PII before sharing with analytics teams");
    lines.push("  2. ENCRYPT the dataset at rest");
    lines.push("  3. RESTRICT access to roles that need raw PII");
    lines.push("  4. AUDIT access to this data");
    lines.push("  5. MINIMIZE collection to the PII fields actually needed");
    lines.blank();
    lines.finish()
}
