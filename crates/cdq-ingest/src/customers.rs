//! Reading and writing the ten-column customer table.

use std::path::Path;

use cdq_model::{Dataset, Field, Record};
use tracing::{debug, warn};

use crate::csv_table::{CsvTable, read_csv_table};
use crate::error::{IngestError, Result};

/// Reads the customer table at `path`.
///
/// Columns are matched by header name, so their order on disk does not
/// matter. Extra columns are ignored. A short row is padded with empty
/// values. Values are never coerced; every cell stays text.
pub fn read_customer_table(path: &Path) -> Result<Dataset> {
    let table = read_csv_table(path)?;
    let dataset = dataset_from_table(path, &table)?;
    debug!(
        path = %path.display(),
        rows = dataset.len(),
        columns = table.headers.len(),
        "loaded customer table"
    );
    Ok(dataset)
}

fn dataset_from_table(path: &Path, table: &CsvTable) -> Result<Dataset> {
    let mut positions = [0usize; 10];
    let mut missing = Vec::new();
    for field in Field::ALL {
        match table.column_index(field.column_name()) {
            Some(idx) => positions[field.index()] = idx,
            None => missing.push(field.column_name().to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }

    let extra: Vec<&str> = table
        .headers
        .iter()
        .map(String::as_str)
        .filter(|header| Field::from_column(header).is_none())
        .collect();
    if !extra.is_empty() {
        warn!(path = %path.display(), columns = ?extra, "ignoring unrecognised columns");
    }

    let records = table
        .rows
        .iter()
        .map(|row| {
            let mut record = Record::default();
            for field in Field::ALL {
                let value = row
                    .get(positions[field.index()])
                    .map(String::as_str)
                    .unwrap_or("");
                record.set(field, value);
            }
            record
        })
        .collect();
    Ok(records)
}

/// Writes `dataset` to `path` with the canonical header order.
pub fn write_customer_table(path: &Path, dataset: &Dataset) -> Result<()> {
    let to_write_error = |source: csv::Error| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(to_write_error)?;
    writer
        .write_record(Field::ALL.map(Field::column_name))
        .map_err(to_write_error)?;
    for record in &dataset.records {
        writer.write_record(record.values()).map_err(to_write_error)?;
    }
    writer
        .flush()
        .map_err(|e| to_write_error(csv::Error::from(e)))?;
    debug!(path = %path.display(), rows = dataset.len(), "wrote customer table");
    Ok(())
}
