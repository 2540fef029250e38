//! Fixed legend keyed by status.

use crate::state::AppState;
use dioxus::prelude::*;
use ssm_core::popup::status_icon_url;
use ssm_schools::mapper::StatusCounts;
use ssm_schools::Status;

/// Status to icon legend with per-status counts.
#[component]
pub fn Legend() -> Element {
    let state = use_context::<AppState>();
    let counts = StatusCounts::tally(state.controller.read().schools());
    let entries: Vec<(&'static str, String, usize)> = Status::ALL
        .iter()
        .map(|status| (status.label(), status_icon_url(*status), counts.get(*status)))
        .collect();

    rsx! {
        div {
            style: "position: absolute; bottom: 24px; left: 12px; padding: 8px 12px; background: white; border-radius: 4px; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.3); font-size: 13px;",
            h4 {
                style: "margin: 0 0 4px 0; font-size: 14px;",
                "School status"
            }
            for (label, icon, count) in entries {
                div {
                    key: "{label}",
                    style: "display: flex; align-items: center; gap: 6px; margin: 2px 0;",
                    img {
                        src: "{icon}",
                        alt: "{label} marker",
                        width: "20",
                        height: "20",
                    }
                    span { "{label} ({count})" }
                }
            }
        }
    }
}
