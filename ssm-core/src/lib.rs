//! Map and controller logic for the school status map.
//!
//! Nothing in this crate touches the browser. The map widget, the CSV
//! source and the timer are reached through the traits in [`capability`],
//! so the adapter and controller run the same against the Google Maps
//! bridge in `ssm-map-ui` and against in-memory fakes in tests.
//!
//! # Flow
//!
//! 1. [`controller::Controller::begin_load`] hands out a generation ticket.
//! 2. [`loader::load_schools`] waits for the capabilities, fetches rows and
//!    maps them into schools.
//! 3. [`controller::Controller::complete_load`] applies the batch unless a
//!    newer load has started since.
//! 4. [`map_adapter::MapAdapter::render`] redraws every marker and
//!    [`map_adapter::MapAdapter::focus`] follows the selection.

pub mod capability;
pub mod config;
pub mod controller;
pub mod error;
pub mod loader;
pub mod map_adapter;
pub mod popup;
pub mod readiness;

pub use config::{AppConfig, MapSettings, RefreshPolicy};
pub use controller::{Controller, LoadCompletion, LoadTicket, SearchOutcome, ViewState};
pub use error::{LoadError, LoadFailure};
pub use map_adapter::MapAdapter;
pub use readiness::{Probe, ReadinessPolicy};

#[cfg(test)]
pub(crate) mod testing;
