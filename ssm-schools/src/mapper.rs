//! Raw rows to validated schools.
//!
//! Mapping is best-effort: a row with unparseable coordinates or an unknown
//! status is dropped and reported as a [`RowWarning`], and the rest of the
//! batch carries on.

use crate::school::{Coordinates, School, Status, NOT_AVAILABLE, NO_ADDRESS, UNNAMED_SCHOOL};
use crate::tabular::{
    RawRow, COL_CITY, COL_DESIGNATION, COL_DISTRICT, COL_LATITUDE, COL_LONGITUDE, COL_NAME,
    COL_STATE, COL_STATUS, COL_STREET, COL_ZIP,
};
use serde::Serialize;
use std::fmt;

/// Why a row was left out of the collection.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum RowIssue {
    InvalidLatitude(String),
    InvalidLongitude(String),
    NonFiniteCoordinates,
    MissingStatus,
    UnknownStatus(String),
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIssue::InvalidLatitude(raw) => write!(f, "invalid latitude {:?}", raw),
            RowIssue::InvalidLongitude(raw) => write!(f, "invalid longitude {:?}", raw),
            RowIssue::NonFiniteCoordinates => f.write_str("coordinates are not finite"),
            RowIssue::MissingStatus => f.write_str("status is empty"),
            RowIssue::UnknownStatus(raw) => write!(f, "unrecognized status {:?}", raw),
        }
    }
}

/// A skipped row. `row` is the 1-based data line number.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct RowWarning {
    pub row: usize,
    pub reason: RowIssue,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.reason)
    }
}

/// Result of mapping one batch of rows.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct MappedBatch {
    pub schools: Vec<School>,
    pub warnings: Vec<RowWarning>,
}

/// Number of schools per status, used by the legend.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct StatusCounts {
    pub defined: usize,
    pub pending: usize,
    pub no_service: usize,
}

impl StatusCounts {
    pub fn tally(schools: &[School]) -> Self {
        schools.iter().fold(Self::default(), |mut counts, school| {
            match school.status {
                Status::Defined => counts.defined += 1,
                Status::Pending => counts.pending += 1,
                Status::NoService => counts.no_service += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Defined => self.defined,
            Status::Pending => self.pending,
            Status::NoService => self.no_service,
        }
    }
}

/// Map every row, keeping the valid ones in source order.
pub fn map_rows(rows: &[RawRow]) -> MappedBatch {
    let mut batch = MappedBatch::default();
    for row in rows {
        match map_row(row) {
            Ok(school) => batch.schools.push(school),
            Err(reason) => {
                let warning = RowWarning {
                    row: row.index + 1,
                    reason,
                };
                log::warn!("mapper: skipping {}", warning);
                batch.warnings.push(warning);
            }
        }
    }
    log::info!(
        "mapper: mapped {} schools, skipped {} rows",
        batch.schools.len(),
        batch.warnings.len()
    );
    batch
}

/// Map a single row into a school.
pub fn map_row(row: &RawRow) -> Result<School, RowIssue> {
    let lat = parse_coordinate(row, COL_LATITUDE).map_err(RowIssue::InvalidLatitude)?;
    let lng = parse_coordinate(row, COL_LONGITUDE).map_err(RowIssue::InvalidLongitude)?;
    let coordinates = Coordinates::new(lat, lng);
    if !coordinates.is_finite() {
        return Err(RowIssue::NonFiniteCoordinates);
    }

    let status = match row.get(COL_STATUS) {
        None => return Err(RowIssue::MissingStatus),
        Some(raw) => Status::parse(raw).ok_or_else(|| RowIssue::UnknownStatus(raw.to_string()))?,
    };

    Ok(School {
        id: School::make_id(&coordinates, row.index),
        name: row.get(COL_NAME).unwrap_or(UNNAMED_SCHOOL).to_string(),
        address: assemble_address(
            row.raw(COL_STREET),
            row.raw(COL_CITY),
            row.raw(COL_STATE),
            row.raw(COL_ZIP),
        ),
        coordinates,
        status,
        designation: row.get(COL_DESIGNATION).unwrap_or(NOT_AVAILABLE).to_string(),
        district: row.get(COL_DISTRICT).unwrap_or(NOT_AVAILABLE).to_string(),
    })
}

fn parse_coordinate(row: &RawRow, column: &str) -> Result<f64, String> {
    let raw = row.get(column).unwrap_or("");
    raw.parse::<f64>().map_err(|_| raw.to_string())
}

/// Join street, city and state with ", " and append the zip after a space.
/// Blank parts are dropped together with their separator.
pub fn assemble_address(street: &str, city: &str, state: &str, zip: &str) -> String {
    let mut address = [street, city, state]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let zip = zip.trim();
    if !zip.is_empty() {
        if !address.is_empty() {
            address.push(' ');
        }
        address.push_str(zip);
    }

    if address.is_empty() {
        NO_ADDRESS.to_string()
    } else {
        address
    }
}
