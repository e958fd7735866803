//! PII detection and per-row exposure.
//!
//! Column risk classes come from the rule registry. Detection runs a
//! pattern per PII column and records every matching cell; exposure counts
//! how many of the five tracked identifiers each row carries.

use cdq_model::{Dataset, Field, PiiClass, PiiRisk, Record, RuleRegistry, UNKNOWN_PLACEHOLDER};
use regex::Regex;

use crate::patterns::{ANY_DATE_SHAPE, ANY_PHONE, EMAIL, PLAIN_NAME, STREET_ADDRESS};

/// Columns scanned for PII, in report order.
pub const DETECTED_FIELDS: [Field; 6] = [
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::Phone,
    Field::Address,
    Field::DateOfBirth,
];

/// Number of identifiers tracked per row for exposure.
pub const TRACKED_IDENTIFIERS: usize = 5;

fn detector(field: Field) -> Option<&'static Regex> {
    match field {
        Field::FirstName | Field::LastName => Some(&*PLAIN_NAME),
        Field::Email => Some(&*EMAIL),
        Field::Phone => Some(&*ANY_PHONE),
        Field::Address => Some(&*STREET_ADDRESS),
        Field::DateOfBirth => Some(&*ANY_DATE_SHAPE),
        _ => None,
    }
}

/// Human-readable description of a column's detector.
pub fn detector_description(field: Field) -> Option<&'static str> {
    match field {
        Field::FirstName | Field::LastName => Some("letters only, 2-50 chars"),
        Field::Email => Some("something@domain.tld"),
        Field::Phone => Some("(555) 123-4567, 555.123.4567, 555-123-4567 or 10 digits"),
        Field::Address => Some("starts with house number"),
        Field::DateOfBirth => Some("YYYY-MM-DD, YYYY/MM/DD or MM/DD/YYYY"),
        _ => None,
    }
}

/// One cell matched by a detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiiDetection {
    /// 1-based row number.
    pub row: usize,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDetections {
    pub field: Field,
    pub detections: Vec<PiiDetection>,
}

/// Exposure band for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExposureLevel {
    Critical,
    High,
    Low,
}

impl ExposureLevel {
    pub fn from_count(pii_fields: usize) -> Self {
        if pii_fields >= TRACKED_IDENTIFIERS {
            Self::Critical
        } else if pii_fields >= 3 {
            Self::High
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowExposure {
    pub row: usize,
    pub customer_id: String,
    /// Tracked identifiers present and well-formed (0-5).
    pub pii_fields: usize,
}

impl RowExposure {
    pub fn fully_exposed(&self) -> bool {
        self.pii_fields == TRACKED_IDENTIFIERS
    }

    pub fn level(&self) -> ExposureLevel {
        ExposureLevel::from_count(self.pii_fields)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiiReport {
    pub total_rows: usize,
    /// Every classified column in column order.
    pub classifications: Vec<(Field, PiiClass)>,
    pub columns: Vec<ColumnDetections>,
    pub exposures: Vec<RowExposure>,
}

impl PiiReport {
    pub fn detected(&self, field: Field) -> &[PiiDetection] {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.detections.as_slice())
            .unwrap_or(&[])
    }

    pub fn columns_at_risk(&self, risk: PiiRisk) -> impl Iterator<Item = &(Field, PiiClass)> {
        self.classifications
            .iter()
            .filter(move |(_, class)| class.risk == risk)
    }

    pub fn fully_exposed_count(&self) -> usize {
        self.exposures.iter().filter(|e| e.fully_exposed()).count()
    }

    pub fn partially_exposed_count(&self) -> usize {
        self.exposures
            .iter()
            .filter(|e| e.pii_fields > 0 && !e.fully_exposed())
            .count()
    }
}

fn matches(field: Field, value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && detector(field).is_some_and(|re| re.is_match(value))
}

fn present_name(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != UNKNOWN_PLACEHOLDER
}

/// Counts the tracked identifiers a row exposes: full name (both parts),
/// email, phone, street address, and date of birth.
pub fn exposure_count(record: &Record) -> usize {
    [
        present_name(&record.first_name) && present_name(&record.last_name),
        matches(Field::Email, &record.email),
        matches(Field::Phone, &record.phone),
        matches(Field::Address, &record.address),
        matches(Field::DateOfBirth, &record.date_of_birth),
    ]
    .into_iter()
    .filter(|present| *present)
    .count()
}

/// Scans `dataset` for PII. Read-only.
pub fn detect_pii(dataset: &Dataset, registry: &RuleRegistry) -> PiiReport {
    let classifications = registry
        .iter()
        .filter_map(|rule| rule.pii.map(|class| (rule.field, class)))
        .collect();

    let columns = DETECTED_FIELDS
        .into_iter()
        .map(|field| ColumnDetections {
            field,
            detections: dataset
                .rows()
                .filter(|(_, record)| matches(field, record.get(field)))
                .map(|(row, record)| PiiDetection {
                    row,
                    value: record.get(field).trim().to_string(),
                })
                .collect(),
        })
        .collect();

    let exposures = dataset
        .rows()
        .map(|(row, record)| RowExposure {
            row,
            customer_id: record.customer_id.trim().to_string(),
            pii_fields: exposure_count(record),
        })
        .collect();

    PiiReport {
        total_rows: dataset.len(),
        classifications,
        columns,
        exposures,
    }
}
