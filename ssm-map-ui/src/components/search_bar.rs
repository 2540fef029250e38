//! Search box for finding a school by name.

use crate::actions;
use crate::state::AppState;
use dioxus::prelude::*;

/// Text input plus submit button. Enter submits as well.
#[component]
pub fn SearchBar() -> Element {
    let state = use_context::<AppState>();
    let mut query = use_signal(String::new);

    let on_input = move |evt: Event<FormData>| {
        query.set(evt.value());
    };

    let on_keydown = move |evt: Event<KeyboardData>| {
        if evt.key() == Key::Enter {
            actions::run_search(state, &query.read());
        }
    };

    rsx! {
        div {
            style: "display: inline-flex; gap: 4px; align-items: center;",
            label {
                r#for: "school-search",
                style: "font-weight: bold; margin-right: 4px;",
                "Find a school: "
            }
            input {
                id: "school-search",
                r#type: "search",
                placeholder: "School name",
                value: "{query}",
                oninput: on_input,
                onkeydown: on_keydown,
            }
            button {
                r#type: "button",
                onclick: move |_| actions::run_search(state, &query.read()),
                "Search"
            }
        }
    }
}
