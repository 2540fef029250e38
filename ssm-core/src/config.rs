//! Static configuration: data URL, Maps API key, map view and load policies.
//!
//! The app embeds `map-config.json` at build time and applies build-time
//! environment overrides on top (see `school-map/build.rs`).

use crate::readiness::ReadinessPolicy;
use serde::Deserialize;
use ssm_schools::Coordinates;

/// What a refresh does while another load is still in flight.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Ignore the request; the refresh control is disabled meanwhile.
    #[default]
    SingleFlight,
    /// Start a new load; the older result is discarded when it lands.
    Restart,
}

/// Initial view and focus behaviour of the map.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// DOM id of the element the map renders into
    pub container_id: String,
    pub center: Coordinates,
    pub zoom: u8,
    /// Zoom applied when a school is selected
    pub focus_zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            container_id: "school-map-canvas".to_string(),
            center: Coordinates::new(40.7128, -74.006),
            zoom: 11,
            focus_zoom: 16,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL of the published CSV export
    pub data_url: String,
    /// Google Maps JavaScript API key
    pub maps_api_key: String,
    pub map: MapSettings,
    pub readiness: ReadinessPolicy,
    pub refresh_policy: RefreshPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_url: "./schools.csv".to_string(),
            maps_api_key: String::new(),
            map: MapSettings::default(),
            readiness: ReadinessPolicy::default(),
            refresh_policy: RefreshPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Parse a JSON config document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the data URL and API key with non-blank overrides.
    pub fn with_overrides(mut self, data_url: Option<&str>, maps_api_key: Option<&str>) -> Self {
        if let Some(url) = data_url.map(str::trim).filter(|s| !s.is_empty()) {
            self.data_url = url.to_string();
        }
        if let Some(key) = maps_api_key.map(str::trim).filter(|s| !s.is_empty()) {
            self.maps_api_key = key.to_string();
        }
        self
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.data_url.trim().is_empty() {
            anyhow::bail!("data_url must not be empty");
        }
        if !self.map.center.is_finite() {
            anyhow::bail!("map.center must be finite");
        }
        if self.readiness.poll_interval_ms == 0 {
            anyhow::bail!("readiness.poll_interval_ms must be positive");
        }
        Ok(())
    }
}
