//! Error display component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// What the user can do about it
    #[props(default = String::new())]
    pub hint: String,
}

/// Displays a load failure and its remediation hint in a styled box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "max-width: 480px; padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "Error: " }
            "{props.message}"
            if !props.hint.is_empty() {
                p {
                    style: "margin: 8px 0 0 0; font-size: 13px; color: #8E2424;",
                    "{props.hint}"
                }
            }
        }
    }
}
