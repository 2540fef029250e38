//! Loading spinner component.

use dioxus::prelude::*;

/// Simple loading indicator.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            role: "status",
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666; background: rgba(255, 255, 255, 0.9); border-radius: 4px;",
            "Loading schools..."
        }
    }
}
