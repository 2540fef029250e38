//! Reusable Dioxus RSX components for the school map.

mod error_display;
mod legend;
mod loading_spinner;
mod map_surface;
mod notice_bar;
mod refresh_button;
mod search_bar;
mod updating_badge;

pub use error_display::ErrorDisplay;
pub use legend::Legend;
pub use loading_spinner::LoadingSpinner;
pub use map_surface::MapSurface;
pub use notice_bar::NoticeBar;
pub use refresh_button::RefreshButton;
pub use search_bar::SearchBar;
pub use updating_badge::UpdatingBadge;
