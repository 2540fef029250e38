//! Search notices and the last-updated line.

use crate::state::AppState;
use dioxus::prelude::*;
use ssm_core::ViewState;

const LOADED_AT_FORMAT: &str = "%b %e, %Y %H:%M UTC";

#[component]
pub fn NoticeBar() -> Element {
    let state = use_context::<AppState>();
    let notice = (state.notice)();
    let summary = match state.controller.read().view() {
        ViewState::Ready(ready) => Some(format!(
            "{} schools, last updated {}",
            ready.schools.len(),
            ready.loaded_at.format(LOADED_AT_FORMAT)
        )),
        _ => None,
    };

    rsx! {
        div {
            style: "margin-top: 6px; font-size: 12px; color: #616161;",
            if let Some(message) = notice {
                div {
                    role: "status",
                    style: "padding: 4px 8px; margin-bottom: 4px; background: #FFF8E1; color: #8D6E00; border: 1px solid #FFE082; border-radius: 4px;",
                    "{message}"
                }
            }
            if let Some(summary) = summary {
                span { "{summary}" }
            }
        }
    }
}
