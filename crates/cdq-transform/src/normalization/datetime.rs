//! Date parsing against an ordered list of source formats.
//!
//! Formats are tried in [`ACCEPTED_DATE_FORMATS`] order and the first that
//! parses wins, so an input valid under two formats always resolves the
//! same way.

use std::fmt;
use std::sync::LazyLock;

use cdq_model::INVALID_DATE;
use chrono::NaiveDate;
use regex::Regex;

use super::{NormalizeOutcome, Normalization};

/// A recognised source date layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateFormat {
    /// `YYYY-MM-DD`, also the canonical output.
    IsoDash,
    /// `YYYY/MM/DD`
    IsoSlash,
    /// `MM/DD/YYYY`
    UsSlash,
}

static ISO_DASH_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").expect("Invalid date regex"));

static ISO_SLASH_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}$").expect("Invalid date regex"));

static US_SLASH_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("Invalid date regex"));

impl DateFormat {
    /// Digit layout a value must have before it is handed to chrono.
    /// chrono's `%Y` alone also takes one to three digit years.
    fn shape(self) -> &'static Regex {
        match self {
            Self::IsoDash => &ISO_DASH_SHAPE,
            Self::IsoSlash => &ISO_SLASH_SHAPE,
            Self::UsSlash => &US_SLASH_SHAPE,
        }
    }

    pub fn pattern(self) -> &'static str {
        match self {
            Self::IsoDash => "%Y-%m-%d",
            Self::IsoSlash => "%Y/%m/%d",
            Self::UsSlash => "%m/%d/%Y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::IsoDash => "YYYY-MM-DD",
            Self::IsoSlash => "YYYY/MM/DD",
            Self::UsSlash => "MM/DD/YYYY",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source formats in tie-break order.
pub const ACCEPTED_DATE_FORMATS: [DateFormat; 3] =
    [DateFormat::IsoDash, DateFormat::IsoSlash, DateFormat::UsSlash];

/// Result of trying every accepted format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateParse {
    Parsed { date: NaiveDate, format: DateFormat },
    Unparseable,
}

impl DateParse {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Parsed { date, .. } => Some(date),
            Self::Unparseable => None,
        }
    }

    pub fn format(self) -> Option<DateFormat> {
        match self {
            Self::Parsed { format, .. } => Some(format),
            Self::Unparseable => None,
        }
    }
}

/// Parses `value` with the first accepted format that matches.
///
/// Years must have exactly four digits.
pub fn parse_date(value: &str) -> DateParse {
    let trimmed = value.trim();
    ACCEPTED_DATE_FORMATS
        .into_iter()
        .filter(|format| format.shape().is_match(trimmed))
        .find_map(|format| {
            NaiveDate::parse_from_str(trimmed, format.pattern())
                .ok()
                .map(|date| DateParse::Parsed { date, format })
        })
        .unwrap_or(DateParse::Unparseable)
}

/// Renders a parseable date as `YYYY-MM-DD`; anything else becomes the
/// `[INVALID_DATE]` sentinel with a [`NormalizeOutcome::Flagged`] outcome.
pub fn normalize_date(raw: &str) -> Normalization {
    match parse_date(raw) {
        DateParse::Parsed { date, .. } => {
            Normalization::compare(raw, date.format("%Y-%m-%d").to_string())
        }
        DateParse::Unparseable if raw.trim() == INVALID_DATE => Normalization::unchanged(raw),
        DateParse::Unparseable => Normalization {
            value: INVALID_DATE.to_string(),
            outcome: NormalizeOutcome::Flagged,
        },
    }
}
