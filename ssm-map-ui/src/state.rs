//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use crate::js_bridge::JsMap;
use dioxus::prelude::*;
use ssm_core::{AppConfig, Controller, MapAdapter};

/// Shared application state for the school map.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Static configuration (data URL, API key, map view)
    pub config: Signal<AppConfig>,
    /// Loading / error / ready state plus search and selection
    pub controller: Signal<Controller>,
    /// Google Maps display and marker registry
    pub map: Signal<MapAdapter<JsMap>>,
    /// Transient message for the user, e.g. a search that found nothing
    pub notice: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState from the embedded configuration.
    pub fn new(config: AppConfig) -> Self {
        let controller = Controller::new(config.refresh_policy);
        let map = MapAdapter::new(JsMap::new(), config.map.clone());
        Self {
            config: Signal::new(config),
            controller: Signal::new(controller),
            map: Signal::new(map),
            notice: Signal::new(None),
        }
    }
}
