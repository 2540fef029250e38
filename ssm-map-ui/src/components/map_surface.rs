//! Full-viewport container the Google Maps display renders into.

use crate::actions;
use crate::state::AppState;
use dioxus::prelude::*;

/// Map container. Redraws markers when the collection changes and follows
/// the selection.
#[component]
pub fn MapSurface() -> Element {
    let state = use_context::<AppState>();
    let revision = use_memo(move || state.controller.read().revision());
    let focus_requests = use_memo(move || state.controller.read().focus_requests());

    use_effect(move || {
        if revision() == 0 {
            return;
        }
        actions::redraw_markers(state);
    });

    use_effect(move || {
        if focus_requests() == 0 {
            return;
        }
        actions::focus_selection(state);
    });

    let container_id = state.config.read().map.container_id.clone();

    rsx! {
        div {
            id: "{container_id}",
            role: "application",
            "aria-label": "Map of schools colored by service status",
            style: "position: absolute; top: 0; left: 0; width: 100%; height: 100%;",
        }
    }
}
