//! Non-blocking "updating" indicator shown during a refresh.

use crate::state::AppState;
use dioxus::prelude::*;
use ssm_core::ViewState;

#[component]
pub fn UpdatingBadge() -> Element {
    let state = use_context::<AppState>();
    let updating = matches!(
        state.controller.read().view(),
        ViewState::Ready(ready) if ready.updating
    );

    rsx! {
        if updating {
            span {
                role: "status",
                style: "margin-left: 8px; padding: 2px 8px; font-size: 12px; color: #1565C0; background: #E3F2FD; border-radius: 10px;",
                "Updating..."
            }
        }
    }
}
