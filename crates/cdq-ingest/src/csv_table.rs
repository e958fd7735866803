//! Raw delimited-text reading.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// A header row plus data rows, every cell trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Position of a header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// Normalizes a header value: trims whitespace and a UTF-8 byte-order mark.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().to_string()
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Reads a CSV file with a single header row.
///
/// Blank lines before the header are skipped. Every line after it is a data
/// row, including rows whose cells are all blank, so row numbers stay aligned
/// with the file. Ragged rows are kept as-is; callers decide how to treat
/// short or long rows.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let file = open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        match headers {
            None if record.iter().all(|value| value.trim().is_empty()) => continue,
            None => headers = Some(record.iter().map(normalize_header).collect()),
            Some(_) => rows.push(record.iter().map(normalize_cell).collect()),
        }
    }

    let headers = headers.ok_or_else(|| IngestError::EmptyCsv {
        path: path.to_path_buf(),
    })?;
    Ok(CsvTable { headers, rows })
}
