//! Wiring between the reactive state and the `ssm-core` load cycle.

use crate::js_bridge::{HttpCsvSource, JsSleeper};
use crate::state::AppState;
use chrono::Utc;
use dioxus::prelude::*;
use ssm_core::capability::{CapabilityKind, TabularSource};
use ssm_core::loader::load_schools;
use ssm_core::map_adapter::{DisplayPhase, SelectCallback};
use ssm_core::{LoadCompletion, Probe, SearchOutcome};
use std::rc::Rc;

/// Start a load (on mount) or a refresh. Ignored while another load is in
/// flight under the single-flight policy.
pub fn start_load(mut state: AppState) {
    let Some(ticket) = state.controller.write().begin_load() else {
        return;
    };
    state.notice.set(None);

    spawn(async move {
        let config = state.config.peek().clone();
        let source = HttpCsvSource;
        let sleeper = JsSleeper;
        let probes = [
            Probe::new(CapabilityKind::Map, move || {
                state.map.peek().is_capability_ready()
            }),
            Probe::new(CapabilityKind::Tabular, || source.is_ready()),
        ];

        let mut map = state.map;
        let result = load_schools(
            &probes,
            &config.readiness,
            &sleeper,
            move || map.write().initialize(),
            &source,
            &config.data_url,
        )
        .await;

        let completion = state
            .controller
            .write()
            .complete_load(ticket, result, Utc::now());
        if completion == LoadCompletion::Superseded {
            log::info!("actions: load {} superseded", ticket.generation);
        }
    });
}

/// Run a name search and tell the user when nothing matched.
pub fn run_search(mut state: AppState, query: &str) {
    let outcome = state.controller.write().search(query);
    let notice = match outcome {
        SearchOutcome::NoMatch => Some(format!("No schools found matching \"{}\"", query.trim())),
        SearchOutcome::Selected(_) | SearchOutcome::Cleared => None,
    };
    state.notice.set(notice);
}

/// Marker click handler: select the clicked school.
fn select_callback(state: AppState) -> SelectCallback {
    Rc::new(move |school_id: &str| {
        let mut controller = state.controller;
        controller.write().select(school_id);
        let mut notice = state.notice;
        notice.set(None);
    })
}

/// Redraw every marker from the current collection.
pub fn redraw_markers(state: AppState) {
    let schools = state.controller.peek().schools().to_vec();
    let mut map = state.map;
    let mut adapter = map.write();
    if adapter.phase() != DisplayPhase::Initialized {
        return;
    }
    if let Err(e) = adapter.render(&schools, select_callback(state)) {
        log::error!("actions: marker redraw failed: {}", e);
    }
}

/// Center the map on the selected school and open its popup.
pub fn focus_selection(state: AppState) {
    let selected = state
        .controller
        .peek()
        .selected()
        .map(|school| school.id.clone());
    if let Some(id) = selected {
        let mut map = state.map;
        map.write().focus(&id);
    }
}
