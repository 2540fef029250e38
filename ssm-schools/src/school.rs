use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for optional text columns left empty in the source sheet.
pub const NOT_AVAILABLE: &str = "N/A";

/// Marker shown when every address column is empty.
pub const NO_ADDRESS: &str = "No address data";

/// Display name for rows without a school name.
pub const UNNAMED_SCHOOL: &str = "Unnamed School";

/// Service status of a school. The set is closed: rows carrying any other
/// value never become a `School`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Status {
    Defined,
    Pending,
    NoService,
}

impl Status {
    /// All statuses in legend order.
    pub const ALL: [Status; 3] = [Status::Defined, Status::Pending, Status::NoService];

    /// Match a raw status cell. Surrounding whitespace is ignored, the rest
    /// must match the sheet spelling exactly.
    pub fn parse(raw: &str) -> Option<Status> {
        match raw.trim() {
            "Defined" => Some(Status::Defined),
            "Pending" => Some(Status::Pending),
            "No Service" => Some(Status::NoService),
            _ => None,
        }
    }

    /// The spelling used in the source sheet.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Defined => "Defined",
            Status::Pending => "Pending",
            Status::NoService => "No Service",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// One mapped, validated row of the schools sheet.
///
/// `id` is built from the coordinates and the row position, so it is unique
/// within a single load but may change between loads if the sheet is
/// reordered.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct School {
    pub id: String,
    pub name: String,
    /// Street, city, state and zip joined for display.
    pub address: String,
    pub coordinates: Coordinates,
    pub status: Status,
    /// Administrative designation, `N/A` when absent.
    pub designation: String,
    /// District, `N/A` when absent.
    pub district: String,
}

impl School {
    /// Identifier for the school at `index` (zero-based data row).
    pub fn make_id(coordinates: &Coordinates, index: usize) -> String {
        format!("{}-{}-{}", coordinates.lat, coordinates.lng, index)
    }

    /// Case-insensitive substring match against the school name.
    /// `needle` is expected to be lowercased already.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}
