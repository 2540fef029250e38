//! Button that reloads the schools sheet.

use crate::actions;
use crate::state::AppState;
use dioxus::prelude::*;

/// Refresh control. Disabled while a load is in flight.
#[component]
pub fn RefreshButton() -> Element {
    let state = use_context::<AppState>();
    let busy = state.controller.read().is_loading();

    rsx! {
        button {
            r#type: "button",
            disabled: busy,
            style: "margin-left: 8px; padding: 4px 12px;",
            onclick: move |_| actions::start_load(state),
            if busy { "Refreshing..." } else { "Refresh" }
        }
    }
}
