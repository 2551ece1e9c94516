//! Endpoint configuration: SeaSpot API, metocean cache, local station.

use integration_metocean::{SeaSpotConfig, StationConfig};
use serde::{Deserialize, Serialize};

/// Upstream base URLs shared by the SeaSpot and station clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// SeaSpot API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Metocean cache base URL, tried before the API (empty = API only)
    #[serde(default)]
    pub cache_base_url: String,

    /// Local station service base URL
    #[serde(default = "default_station_base_url")]
    pub station_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_station_base_url() -> String {
    "http://localhost:5001".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            cache_base_url: String::new(),
            station_base_url: default_station_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EndpointsConfig {
    /// Settings for the SeaSpot client
    #[must_use]
    pub fn seaspot(&self) -> SeaSpotConfig {
        SeaSpotConfig {
            api_base_url: self.api_base_url.clone(),
            cache_base_url: self.cache_base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Settings for the station client
    #[must_use]
    pub fn station(&self) -> StationConfig {
        StationConfig {
            base_url: self.station_base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
