//! School Status Map
//!
//! Shows every school from the published schools sheet as a marker on a
//! Google Map, colored by service status (Defined, Pending, No Service).
//! Hovering a marker opens its popup, clicking selects it, and the search
//! box selects the first school whose name contains the query.
//!
//! Data flow:
//! 1. `build.rs` copies `map-config.json` into `OUT_DIR`; `include_str!`
//!    embeds it, and `SCHOOL_MAP_DATA_URL` / `SCHOOL_MAP_API_KEY` override
//!    it at build time.
//! 2. On mount, the Google Maps script tag is injected and a load starts:
//!    wait for Maps and `fetch`, build the display, fetch the CSV, map rows.
//! 3. The controller applies the batch and the map surface redraws markers.
//! 4. The refresh button repeats step 2 without clearing the current map.

use dioxus::prelude::*;
use ssm_core::{AppConfig, ViewState};
use ssm_map_ui::actions;
use ssm_map_ui::components::{
    ErrorDisplay, Legend, LoadingSpinner, MapSurface, NoticeBar, RefreshButton, SearchBar,
    UpdatingBadge,
};
use ssm_map_ui::js_bridge;
use ssm_map_ui::state::AppState;

/// Map and data source configuration.
const CONFIG_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/map-config.json"));

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("school-map-root"))
        .launch(App);
}

fn load_config() -> AppConfig {
    let config = match AppConfig::from_json(CONFIG_JSON) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid map-config.json, using defaults: {}", e);
            AppConfig::default()
        }
    };
    config.with_overrides(
        option_env!("SCHOOL_MAP_DATA_URL"),
        option_env!("SCHOOL_MAP_API_KEY"),
    )
}

#[component]
fn App() -> Element {
    let state = use_context_provider(|| AppState::new(load_config()));

    // Load the map library and the schools sheet on mount
    use_effect(move || {
        let api_key = state.config.peek().maps_api_key.clone();
        js_bridge::load_map_scripts(&api_key);
        actions::start_load(state);
    });

    let (loading, failure) = match state.controller.read().view() {
        ViewState::Loading => (true, None),
        ViewState::Error(failure) => (false, Some(failure.clone())),
        ViewState::Ready(_) => (false, None),
    };

    rsx! {
        div {
            style: "position: relative; width: 100vw; height: 100vh; overflow: hidden; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            MapSurface {}

            // Toolbar
            div {
                style: "position: absolute; top: 12px; left: 12px; right: 12px; max-width: 640px; padding: 8px 12px; background: white; border-radius: 4px; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.3);",
                h1 {
                    style: "margin: 0 0 6px 0; font-size: 18px;",
                    "School Status Map"
                }
                div {
                    style: "display: flex; flex-wrap: wrap; align-items: center;",
                    SearchBar {}
                    RefreshButton {}
                    UpdatingBadge {}
                }
                NoticeBar {}
            }

            Legend {}

            // Blocking overlays: first load and failures
            if loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%);",
                    LoadingSpinner {}
                }
            }
            if let Some(failure) = failure {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%);",
                    ErrorDisplay {
                        message: failure.message,
                        hint: failure.hint,
                    }
                }
            }
        }
    }
}
