//! Command-level tests against files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use comfy_table::{ContentArrangement, Table};
use tempfile::TempDir;

use cdq_cli::cli::{ProfileArgs, RunArgs};
use cdq_cli::commands::{default_output_dir, rules_table, run_customers, run_profile};
use cdq_cli::summary::{column_table, stage_table};
use cdq_model::RuleRegistry;

const CUSTOMERS: &str = "\
customer_id,first_name,last_name,email,phone,date_of_birth,address,income,account_status,created_date
1,Ann,Lee,ann@example.com,555-987-6543,1990-07-04,\"42 Elm Street, Portland\",61000,active,2023-11-02
7,JOHN,DOE,John@Gmail.com,(555) 123-4567,03/15/1985,,,ACTIVE,2024/01/31
8,mary,Smith,mary@example,12345,invalid_date,9 Harbour Road,-5,pending,2022-02-02
";

fn write_input(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("customers_raw.csv");
    fs::write(&path, content).unwrap();
    path
}

fn plain(mut table: Table) -> String {
    table
        .force_no_tty()
        .set_content_arrangement(ContentArrangement::Disabled);
    table.to_string()
}

fn run_args(input: PathBuf) -> RunArgs {
    RunArgs {
        input,
        output_dir: None,
        as_of: Some("2025-06-01".to_string()),
        skip_pre_validation: false,
        sample_rows: 3,
        dry_run: false,
    }
}

#[test]
fn test_run_writes_into_default_output_dir() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), CUSTOMERS);
    let result = run_customers(&run_args(input)).unwrap();

    let outputs = result.outputs.as_ref().unwrap();
    assert_eq!(outputs.output_dir, dir.path().join("outputs"));
    for name in [
        "customers_cleaned.csv",
        "customers_masked.csv",
        "data_quality_report.txt",
        "pii_detection_report.txt",
        "validation_results.txt",
        "cleaning_log.txt",
        "masked_sample.txt",
        "pipeline_execution_report.txt",
        "action_log.json",
    ] {
        assert!(outputs.output_dir.join(name).exists(), "{name} missing");
    }

    let run = &result.run;
    assert_eq!(run.total_rows(), 3);
    assert_eq!(run.cleaned.records[1].first_name, "John");
    assert_eq!(run.cleaned.records[2].date_of_birth, "[INVALID_DATE]");
    assert!(result.has_warnings());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), CUSTOMERS);
    let mut args = run_args(input);
    args.dry_run = true;
    args.skip_pre_validation = true;
    let result = run_customers(&args).unwrap();

    assert!(result.outputs.is_none());
    assert!(result.run.pre_validation.is_none());
    assert!(!dir.path().join("outputs").exists());
}

#[test]
fn test_explicit_output_dir() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), CUSTOMERS);
    let mut args = run_args(input);
    args.output_dir = Some(dir.path().join("custom").join("nested"));
    let result = run_customers(&args).unwrap();

    let outputs = result.outputs.unwrap();
    assert!(outputs.cleaned.starts_with(dir.path().join("custom")));
    assert!(outputs.cleaned.exists());
}

#[test]
fn test_structural_failures_are_errors() {
    let dir = TempDir::new().unwrap();

    let missing = run_customers(&run_args(dir.path().join("absent.csv"))).unwrap_err();
    assert!(format!("{missing:#}").contains("absent.csv"));

    let input = write_input(dir.path(), "customer_id,first_name\n1,Ann\n");
    let error = run_customers(&run_args(input)).unwrap_err();
    assert!(format!("{error:#}").contains("last_name"));
    assert!(!dir.path().join("outputs").exists());

    let mut bad_date = run_args(dir.path().join("customers_raw.csv"));
    bad_date.as_of = Some("June 1st".to_string());
    let error = run_customers(&bad_date).unwrap_err();
    assert!(error.to_string().contains("June 1st"));
}

#[test]
fn test_profile_writes_two_reports() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), CUSTOMERS);
    let result = run_profile(&ProfileArgs {
        input,
        output_dir: None,
        as_of: Some("2025-06-01".to_string()),
    })
    .unwrap();

    assert_eq!(result.reports.len(), 2);
    assert!(result.output_dir.join("data_quality_report.txt").exists());
    assert!(result.output_dir.join("pii_detection_report.txt").exists());
    assert!(!result.output_dir.join("customers_cleaned.csv").exists());
    assert_eq!(result.profile.total_rows, 3);
    assert!(!result.profile.issues.is_empty());
}

#[test]
fn test_tables_render() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), CUSTOMERS);
    let mut args = run_args(input);
    args.dry_run = true;
    let result = run_customers(&args).unwrap();

    let columns = plain(column_table(&result.run));
    assert!(columns.contains("account_status"));
    assert!(columns.contains("TOTAL"));

    let stages = plain(stage_table(&result.run));
    assert!(stages.contains("Load"));
    assert!(stages.contains("Validate (post-clean)"));
    assert!(stages.contains("WARN"));

    let rules = plain(rules_table(&RuleRegistry::standard()));
    assert!(rules.contains("date_of_birth"));
    assert!(rules.contains("fill '[UNKNOWN]'"));
}

#[test]
fn test_default_output_dir() {
    assert_eq!(
        default_output_dir(Path::new("data/customers_raw.csv")),
        PathBuf::from("data/outputs")
    );
    assert_eq!(
        default_output_dir(Path::new("customers_raw.csv")),
        PathBuf::from("./outputs")
    );
}
