//! Customer table ingestion.
//!
//! Reads the delimited customer file into a [`cdq_model::Dataset`] and
//! writes cleaned or masked datasets back out. Headers and cell values are
//! trimmed on read; nothing else is coerced.

mod csv_table;
mod customers;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv_table::{CsvTable, normalize_header, read_csv_table};

// === Customer Table ===
pub use customers::{read_customer_table, write_customer_table};
