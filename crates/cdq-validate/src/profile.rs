//! Read-only quality profile of a raw dataset.
//!
//! Profiling never modifies data. It measures completeness, type
//! conformance, format variety, and the concrete issues cleaning will have
//! to deal with, each tagged with a severity.

use std::collections::BTreeMap;

use cdq_model::{Dataset, Field, Record, is_missing};
use cdq_transform::{DateFormat, parse_date};
use chrono::NaiveDate;

use crate::checks::IdIndex;
use crate::checks::identifier::integer_digits;
use crate::patterns::{
    BARE_PHONE, DOTTED_PHONE, ISO_DATE_SHAPE, ISO_SLASH_DATE_SHAPE, PARENTHESIZED_PHONE,
    STANDARD_PHONE, US_DATE_SHAPE,
};
use crate::rule_set::{ACCOUNT_STATUSES, MAX_AGE_YEARS, MIN_AGE_YEARS, age_in_years};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Blocks processing of the record.
    Critical,
    /// Data is incorrect.
    High,
    /// Needs cleaning.
    Medium,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::High, Severity::Medium];

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }

    pub fn meaning(self) -> &'static str {
        match self {
            Self::Critical => "blocks processing",
            Self::High => "data incorrect",
            Self::Medium => "needs cleaning",
        }
    }
}

/// The row an issue points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRow {
    /// 1-based row number.
    pub row: usize,
    pub customer_id: String,
}

impl IssueRow {
    fn new(row: usize, record: &Record) -> Self {
        Self {
            row,
            customer_id: record.customer_id.trim().to_string(),
        }
    }
}

/// A quality issue. Each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq)]
pub enum QualityIssue {
    /// Empty values in a column that cleaning will fill.
    MissingValues { field: Field, rows: Vec<IssueRow> },
    /// account_status outside the accepted set.
    InvalidStatus { row: IssueRow, value: String },
    /// Date that matches none of the accepted formats.
    InvalidDate {
        field: Field,
        row: IssueRow,
        value: String,
    },
    Underage {
        row: IssueRow,
        value: String,
        age: f64,
    },
    ImplausibleAge {
        row: IssueRow,
        value: String,
        age: f64,
    },
    /// Parseable date in an alternate format.
    NonStandardDate {
        field: Field,
        row: IssueRow,
        value: String,
    },
    NonStandardPhone { row: IssueRow, value: String },
    EmailNotLowercase { row: IssueRow, value: String },
    NegativeIncome { row: IssueRow, value: f64 },
    /// Every row whose customer_id appears more than once.
    DuplicateIds { rows: Vec<IssueRow> },
}

impl QualityIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingValues { field, .. } => match field {
                Field::AccountStatus => Severity::Critical,
                Field::FirstName | Field::LastName => Severity::High,
                _ => Severity::Medium,
            },
            Self::InvalidStatus { .. } | Self::InvalidDate { .. } | Self::DuplicateIds { .. } => {
                Severity::Critical
            }
            Self::Underage { .. } | Self::ImplausibleAge { .. } | Self::NegativeIncome { .. } => {
                Severity::High
            }
            Self::NonStandardDate { .. }
            | Self::NonStandardPhone { .. }
            | Self::EmailNotLowercase { .. } => Severity::Medium,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::MissingValues { field, .. } => format!("Missing {field}"),
            Self::InvalidStatus { .. } => "Invalid account_status value".to_string(),
            Self::InvalidDate { field, .. } => format!("Invalid date in '{field}'"),
            Self::Underage { .. } => "date_of_birth suggests customer is under 18".to_string(),
            Self::ImplausibleAge { .. } => {
                "date_of_birth suggests impossibly old customer".to_string()
            }
            Self::NonStandardDate { field, .. } => format!("Non-standard date format in '{field}'"),
            Self::NonStandardPhone { .. } => "Non-standard phone format".to_string(),
            Self::EmailNotLowercase { .. } => "Email not lowercase".to_string(),
            Self::NegativeIncome { .. } => "Negative income".to_string(),
            Self::DuplicateIds { .. } => "Duplicate customer_id values".to_string(),
        }
    }

    /// One-line example of the offending data.
    pub fn detail(&self) -> String {
        match self {
            Self::MissingValues { field, rows } => {
                format!("customer_id {} - {field} is empty", join_ids(rows))
            }
            Self::InvalidStatus { row, value } => format!(
                "customer_id {} - value '{value}' not in ({})",
                row.customer_id,
                ACCOUNT_STATUSES.join(", ")
            ),
            Self::InvalidDate { row, value, .. } => format!(
                "customer_id {} - '{value}' is not a recognizable date",
                row.customer_id
            ),
            Self::Underage { row, value, age } | Self::ImplausibleAge { row, value, age } => {
                format!("customer_id {} - DOB {value} -> age ~{age:.1} years", row.customer_id)
            }
            Self::NonStandardDate { row, value, .. } => format!(
                "customer_id {} - '{value}' (expected YYYY-MM-DD)",
                row.customer_id
            ),
            Self::NonStandardPhone { row, value } => format!(
                "customer_id {} - '{value}' (expected XXX-XXX-XXXX)",
                row.customer_id
            ),
            Self::EmailNotLowercase { row, value } => format!(
                "customer_id {} - '{value}' contains uppercase letters",
                row.customer_id
            ),
            Self::NegativeIncome { row, value } => {
                format!("customer_id {} - income = {value}", row.customer_id)
            }
            Self::DuplicateIds { rows } => format!("customer_id {}", join_ids(rows)),
        }
    }

    /// Rows the issue points at.
    pub fn rows(&self) -> Vec<&IssueRow> {
        match self {
            Self::MissingValues { rows, .. } | Self::DuplicateIds { rows } => rows.iter().collect(),
            Self::InvalidStatus { row, .. }
            | Self::InvalidDate { row, .. }
            | Self::Underage { row, .. }
            | Self::ImplausibleAge { row, .. }
            | Self::NonStandardDate { row, .. }
            | Self::NonStandardPhone { row, .. }
            | Self::EmailNotLowercase { row, .. }
            | Self::NegativeIncome { row, .. } => vec![row],
        }
    }
}

fn join_ids(rows: &[IssueRow]) -> String {
    let ids: Vec<&str> = rows.iter().map(|r| r.customer_id.as_str()).collect();
    format!("[{}]", ids.join(", "))
}

/// Missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCompleteness {
    pub field: Field,
    pub missing: usize,
    /// Rounded percentage of non-missing values.
    pub percent_complete: u32,
}

/// The value type a column is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedKind {
    Integer,
    Numeric,
    Date,
    Text,
}

impl ExpectedKind {
    pub fn for_field(field: Field) -> Self {
        match field {
            Field::CustomerId => Self::Integer,
            Field::Income => Self::Numeric,
            Field::DateOfBirth | Field::CreatedDate => Self::Date,
            _ => Self::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Integer => "INT",
            Self::Numeric => "NUMERIC",
            Self::Date => "DATE",
            Self::Text => "STRING",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConformance {
    pub field: Field,
    pub expected: ExpectedKind,
    /// Every non-empty value conforms to the expected kind.
    pub conforms: bool,
}

/// Observed phone layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhoneShape {
    Standard,
    Parenthesized,
    DotSeparated,
    BareDigits,
    Other,
}

impl PhoneShape {
    pub fn classify(value: &str) -> Self {
        if STANDARD_PHONE.is_match(value) {
            Self::Standard
        } else if PARENTHESIZED_PHONE.is_match(value) {
            Self::Parenthesized
        } else if DOTTED_PHONE.is_match(value) {
            Self::DotSeparated
        } else if BARE_PHONE.is_match(value) {
            Self::BareDigits
        } else {
            Self::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard (XXX-XXX-XXXX)",
            Self::Parenthesized => "Parenthesis ((XXX) XXX-XXXX)",
            Self::DotSeparated => "Dot-separated (XXX.XXX.XXXX)",
            Self::BareDigits => "No formatting (10 digits)",
            Self::Other => "Other/Unknown",
        }
    }
}

/// Layout of one non-empty date cell, judged by shape alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSample {
    pub row: usize,
    pub value: String,
    /// `None` when the value has none of the accepted shapes.
    pub format: Option<DateFormat>,
}

fn classify_date_shape(value: &str) -> Option<DateFormat> {
    if ISO_DATE_SHAPE.is_match(value) {
        Some(DateFormat::IsoDash)
    } else if ISO_SLASH_DATE_SHAPE.is_match(value) {
        Some(DateFormat::IsoSlash)
    } else if US_DATE_SHAPE.is_match(value) {
        Some(DateFormat::UsSlash)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityProfile {
    pub total_rows: usize,
    pub completeness: Vec<ColumnCompleteness>,
    pub types: Vec<TypeConformance>,
    pub issues: Vec<QualityIssue>,
    /// Distinct non-empty customer_ids.
    pub distinct_ids: usize,
    /// customer_ids that appear more than once.
    pub duplicate_ids: Vec<String>,
    pub phone_shapes: BTreeMap<PhoneShape, usize>,
    pub date_samples: Vec<(Field, Vec<DateSample>)>,
}

impl QualityProfile {
    pub fn severity_count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == severity)
            .count()
    }

    pub fn completeness_of(&self, field: Field) -> Option<&ColumnCompleteness> {
        self.completeness.iter().find(|c| c.field == field)
    }

    /// Rows with at least one unparseable date.
    pub fn rows_with_invalid_dates(&self) -> usize {
        let mut rows: Vec<usize> = self
            .issues
            .iter()
            .filter_map(|issue| match issue {
                QualityIssue::InvalidDate { row, .. } => Some(row.row),
                _ => None,
            })
            .collect();
        rows.sort_unstable();
        rows.dedup();
        rows.len()
    }
}

const FILLED_COLUMNS: [Field; 5] = [
    Field::FirstName,
    Field::LastName,
    Field::Address,
    Field::Income,
    Field::AccountStatus,
];

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

fn completeness(dataset: &Dataset) -> Vec<ColumnCompleteness> {
    let total = dataset.len();
    Field::ALL
        .into_iter()
        .map(|field| {
            let missing = dataset.column(field).filter(|v| is_missing(v)).count();
            ColumnCompleteness {
                field,
                missing,
                percent_complete: percent(total - missing, total),
            }
        })
        .collect()
}

fn type_conformance(dataset: &Dataset) -> Vec<TypeConformance> {
    Field::ALL
        .into_iter()
        .map(|field| {
            let expected = ExpectedKind::for_field(field);
            let mut values = dataset
                .column(field)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .peekable();
            let conforms = match expected {
                ExpectedKind::Integer => values.all(|v| integer_digits(v).is_some()),
                ExpectedKind::Numeric => values.all(|v| v.parse::<f64>().is_ok()),
                ExpectedKind::Date => {
                    values.peek().is_some() && values.all(|v| parse_date(v).date().is_some())
                }
                ExpectedKind::Text => true,
            };
            TypeConformance {
                field,
                expected,
                conforms,
            }
        })
        .collect()
}

fn collect_issues(dataset: &Dataset, ids: &IdIndex, as_of: NaiveDate) -> Vec<QualityIssue> {
    let mut issues = Vec::new();

    for field in FILLED_COLUMNS {
        let rows: Vec<IssueRow> = dataset
            .rows()
            .filter(|(_, record)| record.is_missing(field))
            .map(|(row, record)| IssueRow::new(row, record))
            .collect();
        if !rows.is_empty() {
            issues.push(QualityIssue::MissingValues { field, rows });
        }
    }

    for (row, record) in dataset.rows() {
        let status = record.account_status.trim();
        if !status.is_empty() && !ACCOUNT_STATUSES.contains(&status.to_lowercase().as_str()) {
            issues.push(QualityIssue::InvalidStatus {
                row: IssueRow::new(row, record),
                value: status.to_string(),
            });
        }
    }

    for field in [Field::DateOfBirth, Field::CreatedDate] {
        for (row, record) in dataset.rows() {
            let value = record.get(field).trim();
            if value.is_empty() {
                continue;
            }
            let Some(date) = parse_date(value).date() else {
                issues.push(QualityIssue::InvalidDate {
                    field,
                    row: IssueRow::new(row, record),
                    value: value.to_string(),
                });
                continue;
            };
            if field != Field::DateOfBirth {
                continue;
            }
            let age = age_in_years(date, as_of);
            if age < MIN_AGE_YEARS {
                issues.push(QualityIssue::Underage {
                    row: IssueRow::new(row, record),
                    value: value.to_string(),
                    age,
                });
            } else if age > MAX_AGE_YEARS {
                issues.push(QualityIssue::ImplausibleAge {
                    row: IssueRow::new(row, record),
                    value: value.to_string(),
                    age,
                });
            }
        }
    }

    for field in [Field::DateOfBirth, Field::CreatedDate] {
        for (row, record) in dataset.rows() {
            let value = record.get(field).trim();
            if value.is_empty() || ISO_DATE_SHAPE.is_match(value) {
                continue;
            }
            // Unparseable values were already reported as invalid.
            if parse_date(value).date().is_some() {
                issues.push(QualityIssue::NonStandardDate {
                    field,
                    row: IssueRow::new(row, record),
                    value: value.to_string(),
                });
            }
        }
    }

    for (row, record) in dataset.rows() {
        let phone = record.phone.trim();
        if !phone.is_empty() && !STANDARD_PHONE.is_match(phone) {
            issues.push(QualityIssue::NonStandardPhone {
                row: IssueRow::new(row, record),
                value: phone.to_string(),
            });
        }
    }

    for (row, record) in dataset.rows() {
        let email = record.email.trim();
        if !email.is_empty() && email != email.to_lowercase() {
            issues.push(QualityIssue::EmailNotLowercase {
                row: IssueRow::new(row, record),
                value: email.to_string(),
            });
        }
    }

    for (row, record) in dataset.rows() {
        if let Ok(income) = record.income.trim().parse::<f64>()
            && income < 0.0
        {
            issues.push(QualityIssue::NegativeIncome {
                row: IssueRow::new(row, record),
                value: income,
            });
        }
    }

    let duplicates = ids.duplicates();
    if !duplicates.is_empty() {
        let rows = dataset
            .rows()
            .filter(|(_, record)| duplicates.contains(&record.customer_id.trim()))
            .map(|(row, record)| IssueRow::new(row, record))
            .collect();
        issues.push(QualityIssue::DuplicateIds { rows });
    }

    issues
}

/// Profiles a raw dataset. `as_of` is the reference date for age checks.
pub fn profile_dataset(dataset: &Dataset, as_of: NaiveDate) -> QualityProfile {
    let ids = IdIndex::from_dataset(dataset);

    let mut phone_shapes = BTreeMap::new();
    for phone in dataset.column(Field::Phone).map(str::trim) {
        if !phone.is_empty() {
            *phone_shapes.entry(PhoneShape::classify(phone)).or_insert(0) += 1;
        }
    }

    let date_samples = [Field::DateOfBirth, Field::CreatedDate]
        .into_iter()
        .map(|field| {
            let samples = dataset
                .rows()
                .filter_map(|(row, record)| {
                    let value = record.get(field).trim();
                    (!value.is_empty()).then(|| DateSample {
                        row,
                        value: value.to_string(),
                        format: classify_date_shape(value),
                    })
                })
                .collect();
            (field, samples)
        })
        .collect();

    QualityProfile {
        total_rows: dataset.len(),
        completeness: completeness(dataset),
        types: type_conformance(dataset),
        issues: collect_issues(dataset, &ids, as_of),
        distinct_ids: ids.distinct(),
        duplicate_ids: ids.duplicates().into_iter().map(str::to_string).collect(),
        phone_shapes,
        date_samples,
    }
}
