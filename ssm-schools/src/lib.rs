//! School records and CSV handling for the school status map.
//!
//! This crate provides:
//! - `school`: the `School` entity and its closed `Status` enumeration
//! - `tabular`: header-keyed CSV rows parsed with the `csv` crate
//! - `mapper`: best-effort conversion of raw rows into validated schools

pub mod mapper;
pub mod school;
pub mod tabular;

pub use mapper::{map_rows, MappedBatch, RowIssue, RowWarning};
pub use school::{Coordinates, School, Status};
pub use tabular::{parse_rows, RawRow, TabularError};
