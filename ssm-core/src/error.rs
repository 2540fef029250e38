//! Load failures and the remediation hints shown next to them.

use crate::capability::CapabilityKind;
use serde::Serialize;
use thiserror::Error;

/// A failure that aborts the current load. Row-level problems never end up
/// here; they are reported as `RowWarning`s by the mapper.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// A capability was still unavailable when the readiness bound ran out
    #[error("{capability} did not become available within {waited_ms} ms")]
    CapabilityTimeout {
        capability: CapabilityKind,
        waited_ms: u64,
    },

    /// The data source could not be reached or answered with an error
    #[error("Unable to reach the school data source: {0}")]
    Fetch(String),

    /// The document arrived but is not a usable schools sheet
    #[error("School data is malformed: {0}")]
    Malformed(String),

    /// The map display could not be created
    #[error("Google Maps display could not be created: {0}")]
    Display(String),
}

impl From<ssm_schools::TabularError> for LoadError {
    fn from(err: ssm_schools::TabularError) -> Self {
        LoadError::Malformed(err.to_string())
    }
}

/// Which remediation text to show for a failure.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum FailureKind {
    MapCapability,
    ParseCapability,
    DataSource,
}

impl FailureKind {
    pub fn hint(&self) -> &'static str {
        match self {
            FailureKind::MapCapability => {
                "Google Maps failed to load. Check your network connection and that the Maps API key is valid for this site."
            }
            FailureKind::ParseCapability => {
                "The CSV loader is unavailable. Reload the page, and check that the browser allows network requests to the data source."
            }
            FailureKind::DataSource => {
                "Check that the spreadsheet is published to the web as CSV and that the configured data URL points at it."
            }
        }
    }
}

const MAP_KEYWORDS: [&str; 2] = ["google", "maps"];
const PARSE_KEYWORDS: [&str; 3] = ["loader", "parser", "tabular"];

/// Classify a failure message by keyword. Map keywords win over parser
/// keywords; anything else is treated as a data source problem.
pub fn classify_failure(message: &str) -> FailureKind {
    let lowered = message.to_lowercase();
    if MAP_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        FailureKind::MapCapability
    } else if PARSE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        FailureKind::ParseCapability
    } else {
        FailureKind::DataSource
    }
}

/// What the error view shows: the failure message and what to do about it.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct LoadFailure {
    pub message: String,
    pub hint: String,
    pub kind: FailureKind,
}

impl From<&LoadError> for LoadFailure {
    fn from(err: &LoadError) -> Self {
        let message = err.to_string();
        let kind = classify_failure(&message);
        Self {
            message,
            hint: kind.hint().to_string(),
            kind,
        }
    }
}
