//! Report rendering and output writing.

use cdq_core::{PipelineOptions, PipelineRun, run_pipeline};
use cdq_model::{Dataset, Record};
use cdq_report::{
    ACTION_LOG_FILE, render_cleaning_log, render_execution_report, render_masked_sample,
    render_pii_report, render_quality_report, render_validation_results, write_outputs,
    write_profile_reports,
};
use chrono::NaiveDate;
use tempfile::TempDir;

fn record(values: [&str; 10]) -> Record {
    Record::from_values(values).unwrap()
}

fn sample_run() -> PipelineRun {
    let rows = vec![
        record([
            "1", "Ann", "Lee", "ann@example.com", "555-987-6543", "1990-07-04",
            "42 Elm Street, Portland", "61000", "active", "2023-11-02",
        ]),
        record([
            "7", "JOHN", "DOE", "John@Gmail.com", "(555) 123-4567", "03/15/1985", "", "",
            "ACTIVE", "2024/01/31",
        ]),
        record([
            "7", "mary", "", "mary@example", "12345", "13/45/2024",
            "9 Harbour Road, Halifax", "-5", "pending", "2022-02-02",
        ]),
    ];
    let options = PipelineOptions::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    run_pipeline(Dataset::new(rows), &options)
}

fn contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|line| line.contains(needle))
}

#[test]
fn test_quality_report_counts() {
    let run = sample_run();
    let lines = render_quality_report(&run.profile);

    assert_eq!(lines[0], "DATA QUALITY PROFILE REPORT");
    assert!(contains(&lines, "Rows profiled: 3"));
    assert!(contains(&lines, "customer_id: DUPLICATES FOUND (7)"));
    assert!(contains(&lines, "Duplicate customer_id values"));
    assert!(contains(&lines, "Invalid date in 'date_of_birth'"));
    assert!(contains(&lines, "Row 2: '03/15/1985' -> MM/DD/YYYY"));
    assert!(contains(&lines, "Row 1: '1990-07-04' -> YYYY-MM-DD"));
    assert!(contains(&lines, "1 row(s) with invalid dates"));
    assert!(contains(&lines, "1 row(s) with uppercase email"));
    assert_eq!(lines.last().unwrap(), &"=".repeat(60));
}

#[test]
fn test_pii_report_exposure_rows() {
    let run = sample_run();
    let lines = render_pii_report(&run.pii);

    assert!(contains(&lines, "HIGH RISK columns"));
    assert!(contains(&lines, "email: 2/3 rows (67%) contain PII"));
    assert!(contains(&lines, "Fully exposed rows (all 5 PII fields present): 1/3"));
    assert!(contains(&lines, "Partially exposed rows (some PII present):     2/3"));
    assert!(contains(&lines, "    - customer_id: [Internal Identifier]"));
    assert!(!contains(&lines, "    - account_status:"));
}

#[test]
fn test_validation_results_reference_rows() {
    let run = sample_run();
    let pre = run.pre_validation.as_ref().unwrap();
    let lines = render_validation_results(pre, &run.registry);

    assert!(contains(&lines, "Rule set: pre-clean"));
    assert!(contains(&lines, "PASS (all checks):         1 rows"));
    assert!(contains(&lines, "  - Row 2 (customer_id=7): duplicate customer_id 7 (2 occurrences)"));
    assert!(contains(&lines, "  - Row 3 (customer_id=7): duplicate customer_id 7 (2 occurrences)"));
    assert!(contains(&lines, "  Row 1 (customer_id=1): PASS"));
    assert!(contains(&lines, "first_name: OK - No failures"));
    assert!(contains(&lines, "last_name: FAIL - 1 failure(s)"));
}

#[test]
fn test_cleaning_log_lists_actions() {
    let run = sample_run();
    let lines = render_cleaning_log(&run);

    assert!(contains(&lines, "[Phone normalization] Row 2: '(555) 123-4567' -> '555-123-4567'"));
    assert!(contains(&lines, "[Invalid date flagged (date_of_birth)] Row 3: '13/45/2024' -> '[INVALID_DATE]'"));
    assert!(contains(&lines, "income: 1 row(s) filled with '0'"));
    assert!(contains(&lines, "Before cleaning: 1 passed, 2 failed"));
    assert!(contains(&lines, "rows: [2, 3]"));
    assert!(!contains(&lines, "[Masked"));
    let numbered = lines
        .iter()
        .filter(|line| line.trim_start().starts_with(|c: char| c.is_ascii_digit()))
        .count();
    assert_eq!(numbered, run.log.cleaning_entries().count());
}

#[test]
fn test_masked_sample_respects_row_limit() {
    let mut run = sample_run();
    run.options.mask_sample_rows = 1;
    let lines = render_masked_sample(&run);

    assert!(contains(&lines, "BEFORE MASKING (first 1 rows):"));
    assert!(contains(&lines, "'john.doe@gmail.com' -> 'j***@gmail.com'"));
    assert!(contains(&lines, "'75000' -> '75000'"));
    assert!(contains(&lines, "FULL MASKED DATASET (all 3 rows, key columns):"));
    assert!(contains(&lines, "***-***-4567"));
}

#[test]
fn test_execution_report_stages() {
    let run = sample_run();
    let lines = render_execution_report(&run, &[], std::time::Duration::from_millis(1500), &[]);

    assert!(contains(&lines, "Duration:  1.50 seconds"));
    assert!(contains(&lines, "Stage 1: Profile"));
    assert!(contains(&lines, "[FAIL] Critical validation failures detected"));
    assert!(!contains(&lines, "Stage 8: Save"));
    assert!(contains(&lines, "Status: COMPLETED WITH WARNINGS"));
    assert!(contains(&lines, "1 date(s) flagged invalid"));
}

#[test]
fn test_write_outputs_creates_every_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("outputs");
    let run = sample_run();
    let paths = write_outputs(&run, &out).unwrap();

    assert_eq!(paths.reports.len(), 6);
    for path in paths.reports.iter().chain([&paths.cleaned, &paths.masked]) {
        assert!(path.exists(), "{} missing", path.display());
    }

    let masked = std::fs::read_to_string(&paths.masked).unwrap();
    assert!(masked.starts_with("customer_id,first_name"));
    assert!(masked.contains("J***"));
    assert_eq!(masked.lines().count(), 4);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join(ACTION_LOG_FILE)).unwrap())
            .unwrap();
    assert_eq!(json["rows"], 3);
    assert_eq!(json["entries"].as_array().unwrap().len(), run.log.len());
    assert_eq!(json["entries"][0]["row"], 2);

    let execution = std::fs::read_to_string(paths.reports.last().unwrap()).unwrap();
    assert!(execution.contains("Saved customers_cleaned.csv"));
}

#[test]
fn test_write_profile_reports_only() {
    let dir = TempDir::new().unwrap();
    let run = sample_run();
    let written = write_profile_reports(&run.profile, &run.pii, dir.path()).unwrap();
    assert_eq!(written.len(), 2);
    assert!(!dir.path().join("cleaning_log.txt").exists());
}
