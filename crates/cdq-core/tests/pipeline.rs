//! End-to-end tests for the pipeline orchestrator.

use std::io::Write;
use std::path::Path;

use cdq_core::{PipelineOptions, Stage, run_file, run_pipeline};
use cdq_model::{ActionCategory, Dataset, Field, Record};
use chrono::NaiveDate;
use tempfile::NamedTempFile;

fn options() -> PipelineOptions {
    PipelineOptions::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
}

fn john() -> Record {
    Record {
        customer_id: "7".to_string(),
        first_name: "JOHN".to_string(),
        last_name: "DOE".to_string(),
        email: "John@Gmail.com".to_string(),
        phone: "(555) 123-4567".to_string(),
        date_of_birth: "03/15/1985".to_string(),
        address: String::new(),
        income: String::new(),
        account_status: "ACTIVE".to_string(),
        created_date: "2024/01/31".to_string(),
    }
}

fn clean(id: &str) -> Record {
    Record {
        customer_id: id.to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: "ann@example.com".to_string(),
        phone: "555-987-6543".to_string(),
        date_of_birth: "1990-07-04".to_string(),
        address: "42 Elm Street, Portland".to_string(),
        income: "61000".to_string(),
        account_status: "inactive".to_string(),
        created_date: "2023-11-02".to_string(),
    }
}

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_end_to_end_row() {
    let run = run_pipeline(Dataset::new(vec![john()]), &options());

    let cleaned = &run.cleaned.records[0];
    assert_eq!(cleaned.first_name, "John");
    assert_eq!(cleaned.last_name, "Doe");
    assert_eq!(cleaned.phone, "555-123-4567");
    assert_eq!(cleaned.date_of_birth, "1985-03-15");
    assert_eq!(cleaned.created_date, "2024-01-31");
    assert_eq!(cleaned.email, "john@gmail.com");
    assert_eq!(cleaned.account_status, "active");
    assert_eq!(cleaned.income, "0");
    assert_eq!(cleaned.address, "[UNKNOWN]");

    let masked = &run.masked.records[0];
    assert_eq!(masked.first_name, "J***");
    assert_eq!(masked.phone, "***-***-4567");
    assert_eq!(masked.date_of_birth, "1985-**-**");
    assert_eq!(masked.email, "j***@gmail.com");
    // Fill placeholders pass through masking; only real addresses are redacted.
    assert_eq!(masked.address, "[UNKNOWN]");
    assert_eq!(masked.income, "0");
    assert_eq!(masked.account_status, "active");
    assert_eq!(masked.customer_id, "7");

    // Raw table is never mutated.
    assert_eq!(run.raw.records[0], john());
}

#[test]
fn test_masked_address_for_present_value() {
    let mut record = john();
    record.address = "9 Harbour Road, Halifax".to_string();
    let run = run_pipeline(Dataset::new(vec![record]), &options());
    assert_eq!(run.masked.records[0].address, "[MASKED ADDRESS]");
}

#[test]
fn test_action_log_and_counters() {
    let run = run_pipeline(Dataset::new(vec![clean("1"), john()]), &options());
    let counters = run.log.counters();

    assert_eq!(counters.phones_normalized, 1);
    assert_eq!(counters.dates_normalized, 2);
    assert_eq!(counters.names_normalized, 2);
    assert_eq!(counters.emails_normalized, 1);
    assert_eq!(counters.statuses_normalized, 1);
    assert_eq!(counters.filled_for(Field::Income), 1);
    assert_eq!(counters.filled_for(Field::Address), 1);

    // Every cleaning entry for the messy row points at row 2.
    assert!(run.log.cleaning_entries().all(|e| e.row == 2));
    let fill = run
        .log
        .by_category(ActionCategory::Filled)
        .find(|e| e.field == Field::Income)
        .unwrap();
    assert_eq!(fill.detail(), "Row 2: empty -> '0'");

    // Masking happens after cleaning in the log.
    let first_masked = run
        .log
        .entries()
        .iter()
        .position(|e| e.category == ActionCategory::Masked)
        .unwrap();
    assert_eq!(first_masked, run.log.cleaning_entries().count());
}

#[test]
fn test_fill_policy_coverage() {
    let mut rows = Vec::new();
    for id in 1..=4 {
        let mut record = clean(&id.to_string());
        if id % 2 == 0 {
            record.income = "  ".to_string();
            record.account_status.clear();
        }
        rows.push(record);
    }
    let run = run_pipeline(Dataset::new(rows), &options());
    for (row, record) in run.raw.rows() {
        let cleaned = run.cleaned.row(row).unwrap();
        if record.income.trim().is_empty() {
            assert_eq!(cleaned.income, "0");
        }
        if record.account_status.is_empty() {
            assert_eq!(cleaned.account_status, "unknown");
        }
    }
    // `unknown` is only acceptable after the fill policy introduced it.
    let pre = run.pre_validation.as_ref().unwrap();
    assert_eq!(pre.rows_failing(Field::AccountStatus), vec![2, 4]);
    assert!(run.post_validation.rows_failing(Field::AccountStatus).is_empty());
}

#[test]
fn test_duplicate_ids_fail_both_rows() {
    let rows = vec![clean("10"), clean("11"), clean("10")];
    let run = run_pipeline(Dataset::new(rows), &options());

    assert_eq!(run.post_validation.rows_failing(Field::CustomerId), vec![1, 3]);
    assert_eq!(run.post_validation.passed_count(), 1);
    // Duplicates are surfaced, never dropped or repaired.
    assert_eq!(run.cleaned.len(), 3);
    assert_eq!(run.cleaned.records[2].customer_id, "10");
}

#[test]
fn test_row_count_invariant_with_bad_rows() {
    let mut broken = clean("3");
    broken.phone = "12345".to_string();
    broken.email = "not-an-email".to_string();
    broken.date_of_birth = "13/45/2024".to_string();
    broken.income = "abc".to_string();
    let rows = vec![clean("1"), broken, clean("2")];
    let run = run_pipeline(Dataset::new(rows), &options());

    assert_eq!(run.raw.len(), 3);
    assert_eq!(run.cleaned.len(), 3);
    assert_eq!(run.masked.len(), 3);
    assert_eq!(run.post_validation.total_rows(), 3);

    assert_eq!(run.cleaned.records[1].phone, "12345");
    assert_eq!(run.cleaned.records[1].date_of_birth, "[INVALID_DATE]");
    assert_eq!(run.masked.records[1].date_of_birth, "[INVALID_DATE]");
    assert_eq!(run.log.counters().dates_flagged, 1);

    assert!(run.has_critical_failures());
    assert_eq!(run.critical_failures[&Field::Phone], vec![2]);
    assert_eq!(run.critical_failures[&Field::Email], vec![2]);
    let post = run.timeline.stage(Stage::ValidatePost).unwrap();
    assert!(!post.ok());
    assert_eq!(run.post_validation.failed_rows(), vec![2]);
}

#[test]
fn test_stage_order_and_skipped_pre_validation() {
    let options = options().with_pre_validation(false);
    let run = run_pipeline(Dataset::new(vec![clean("1")]), &options);

    let stages: Vec<Stage> = run.timeline.stages().iter().map(|r| r.stage).collect();
    assert_eq!(
        stages,
        vec![
            Stage::Profile,
            Stage::Normalize,
            Stage::ValidatePre,
            Stage::FillMissing,
            Stage::ValidatePost,
            Stage::DetectPii,
            Stage::Mask,
        ]
    );
    assert!(run.pre_validation.is_none());
    assert!(!run.has_critical_failures());
}

#[test]
fn test_run_file_loads_and_records_load_stage() {
    let file = create_temp_csv(
        "customer_id,first_name,last_name,email,phone,date_of_birth,address,income,account_status,created_date\n\
         7,JOHN,DOE,John@Gmail.com,(555) 123-4567,03/15/1985,,,ACTIVE,2024/01/31\n",
    );
    let run = run_file(file.path(), &options()).unwrap();

    assert_eq!(run.total_rows(), 1);
    assert_eq!(run.timeline.stages()[0].stage, Stage::Load);
    assert!(run.timeline.stages()[0].events[0].message.contains("1 rows"));
    assert_eq!(run.cleaned.records[0].phone, "555-123-4567");
}

#[test]
fn test_run_file_keeps_all_blank_rows() {
    let file = create_temp_csv(
        "customer_id,first_name,last_name,email,phone,date_of_birth,address,income,account_status,created_date\n\
         1,Ann,Lee,ann@x.io,555-123-4567,1990-01-01,12 Main St,100,active,2024-01-01\n\
         ,,,,,,,,,\n\
         3,Bo,Ray,bo@x.io,555-987-6543,1991-02-02,9 Elm St,200,ACTIVE,2024-02-02\n",
    );
    let run = run_file(file.path(), &options()).unwrap();

    assert_eq!(run.total_rows(), 3);
    let status = run
        .log
        .by_category(ActionCategory::Normalized)
        .find(|e| e.field == Field::AccountStatus)
        .unwrap();
    assert_eq!(status.row, 3);
    assert_eq!(run.cleaned.records[2].customer_id, "3");
}

#[test]
fn test_run_file_missing_input_is_fatal() {
    let error = run_file(Path::new("/nonexistent/customers_raw.csv"), &options()).unwrap_err();
    assert!(format!("{error:#}").contains("customers_raw.csv"));
}

#[test]
fn test_empty_dataset() {
    let run = run_pipeline(Dataset::default(), &options());
    assert!(run.cleaned.is_empty());
    assert!(run.log.is_empty());
    assert_eq!(run.post_validation.passed_count(), 0);
}
