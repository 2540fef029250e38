//! Dioxus components and Google Maps bridge for the school status map.
//!
//! This crate provides:
//! - `js_bridge`: the browser implementations of the `ssm-core` capabilities
//!   (Google Maps via an embedded JS shim, CSV over `fetch`, `setTimeout` sleeps)
//! - `state`: Reactive AppState with Dioxus Signals
//! - `actions`: load, refresh and search wiring between state and capabilities
//! - `components`: RSX components (search bar, legend, map surface, etc.)

pub mod actions;
pub mod components;
pub mod js_bridge;
pub mod state;
