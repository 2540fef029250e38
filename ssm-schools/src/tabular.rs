//! Header-keyed CSV rows.
//!
//! The published schools sheet is exported as CSV with a single header line.
//! Each data line becomes a [`RawRow`] keyed by the trimmed header names.
//! Structural problems (no header, unreadable record, required column
//! missing) fail the whole document; cell-level problems are left to the
//! mapper.

use csv::{ReaderBuilder, Trim};
use std::collections::BTreeMap;
use thiserror::Error;

pub const COL_NAME: &str = "School Name";
pub const COL_STREET: &str = "Street Address";
pub const COL_CITY: &str = "City";
pub const COL_STATE: &str = "State";
pub const COL_ZIP: &str = "Zip Code";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_STATUS: &str = "Status";
pub const COL_DESIGNATION: &str = "Administrative Designation";
pub const COL_DISTRICT: &str = "District";

/// Columns without which no row could ever map to a school.
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_LATITUDE, COL_LONGITUDE, COL_STATUS];

/// Document-level failures while reading the schools CSV.
#[derive(Error, Debug)]
pub enum TabularError {
    /// The document had no header line at all
    #[error("CSV document is empty (no header row)")]
    MissingHeader,

    /// A required column is absent from the header
    #[error("CSV header is missing required column \"{0}\"")]
    MissingColumn(&'static str),

    /// The csv reader could not decode a record
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// One data line of the sheet, keyed by header name.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct RawRow {
    /// Zero-based position among the data lines.
    pub index: usize,
    fields: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insert, mostly for tests and fakes.
    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: &str) {
        self.fields.insert(column.to_string(), value.to_string());
    }

    /// The trimmed cell for `column`, or `None` when the column is absent or
    /// the cell is blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// The untrimmed cell for `column`, empty when absent.
    pub fn raw(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Parse a CSV document with a header line into ordered rows.
pub fn parse_rows(csv_text: &str) -> Result<Vec<RawRow>, TabularError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(csv_text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(TabularError::MissingHeader);
    }
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(TabularError::MissingColumn(required));
        }
    }

    let mut rows = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        let mut row = RawRow::new(index);
        for (i, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            row.insert(header, record.get(i).unwrap_or(""));
        }
        rows.push(row);
    }
    log::info!("tabular: parsed {} rows with {} columns", rows.len(), headers.len());
    Ok(rows)
}
