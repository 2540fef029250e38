//! Narrow interfaces to the collaborators this crate does not implement.
//!
//! The browser side (`ssm-map-ui`) provides the Google Maps widget, the
//! HTTP CSV source and a `setTimeout` based sleeper. Tests use fakes.

use crate::error::LoadError;
use futures::future::LocalBoxFuture;
use serde::Serialize;
use ssm_schools::{Coordinates, RawRow};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Names a capability in readiness errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum CapabilityKind {
    Map,
    Tabular,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityKind::Map => f.write_str("Google Maps"),
            CapabilityKind::Tabular => f.write_str("CSV loader"),
        }
    }
}

/// Marker interactions the adapter listens for.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum MarkerEvent {
    Hover,
    Click,
}

/// Callback attached to a marker event.
pub type EventCallback = Rc<dyn Fn()>;

/// The map widget: one display, many markers, a single shared popup.
pub trait MapCapability {
    /// Handle for a marker created on the display.
    type Marker: Clone + 'static;

    /// Whether the underlying widget library has loaded.
    fn is_ready(&self) -> bool;

    /// Create the display inside the element `container_id`.
    fn construct_display(
        &mut self,
        container_id: &str,
        center: Coordinates,
        zoom: u8,
    ) -> Result<(), LoadError>;

    fn create_marker(&mut self, position: Coordinates, icon: &str, title: &str) -> Self::Marker;

    fn bind_event(&mut self, marker: &Self::Marker, event: MarkerEvent, callback: EventCallback);

    /// Fill the shared popup with `html` and open it on `anchor`.
    fn open_popup(&mut self, html: &str, anchor: &Self::Marker);

    fn pan_to(&mut self, position: Coordinates);

    fn set_zoom(&mut self, level: u8);

    fn remove_marker(&mut self, marker: &Self::Marker);
}

/// Fetch-and-parse of the schools sheet.
pub trait TabularSource {
    fn is_ready(&self) -> bool;

    /// Download `url` and return its rows in document order.
    fn fetch_rows<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<Vec<RawRow>, LoadError>>;
}

/// Cooperative timer used between readiness polls.
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}
