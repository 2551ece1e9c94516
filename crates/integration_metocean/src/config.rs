//! Client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// SeaSpot API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeaSpotConfig {
    /// Base URL of the SeaSpot API (metadata, search, metocean fallback)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the metocean cache, tried before the API; empty disables it
    #[serde(default)]
    pub cache_base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for SeaSpotConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            cache_base_url: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl SeaSpotConfig {
    /// Bases the metocean endpoints are tried on, in priority order
    pub fn metocean_bases(&self) -> Vec<&str> {
        [self.cache_base_url.as_str(), self.api_base_url.as_str()]
            .into_iter()
            .filter(|b| !b.is_empty())
            .collect()
    }
}

/// Local weather station service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// Base URL of the station service (default: <http://localhost:5001>)
    #[serde(default = "default_station_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_station_base_url() -> String {
    "http://localhost:5001".to_string()
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            base_url: default_station_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// weather.com personal weather station configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct PwsConfig {
    /// API base URL (default: <https://api.weather.com>)
    #[serde(default = "default_pws_base_url")]
    pub base_url: String,

    /// Station identifier (default: IRIODE90)
    #[serde(default = "default_station_id")]
    pub station_id: String,

    /// API key; checked when a request is made
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for PwsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PwsConfig")
            .field("base_url", &self.base_url)
            .field("station_id", &self.station_id)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_pws_base_url() -> String {
    "https://api.weather.com".to_string()
}

fn default_station_id() -> String {
    "IRIODE90".to_string()
}

impl Default for PwsConfig {
    fn default() -> Self {
        Self {
            base_url: default_pws_base_url(),
            station_id: default_station_id(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl PwsConfig {
    /// The API key, if one is set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seaspot_defaults() {
        let config = SeaSpotConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert!(config.cache_base_url.is_empty());
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn metocean_bases_cache_first() {
        let config = SeaSpotConfig {
            api_base_url: "http://api".to_string(),
            cache_base_url: "http://cache".to_string(),
            timeout_secs: 10,
        };
        assert_eq!(config.metocean_bases(), vec!["http://cache", "http://api"]);
    }

    #[test]
    fn metocean_bases_without_cache() {
        assert_eq!(
            SeaSpotConfig::default().metocean_bases(),
            vec!["http://localhost:8000"]
        );
    }

    #[test]
    fn station_defaults() {
        assert_eq!(StationConfig::default().base_url, "http://localhost:5001");
    }

    #[test]
    fn pws_defaults() {
        let config = PwsConfig::default();
        assert_eq!(config.base_url, "https://api.weather.com");
        assert_eq!(config.station_id, "IRIODE90");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn pws_blank_key_counts_as_missing() {
        let config = PwsConfig {
            api_key: Some(SecretString::from("  ")),
            ..PwsConfig::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn pws_debug_redacts_key() {
        let config = PwsConfig {
            api_key: Some(SecretString::from("super-secret")),
            ..PwsConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: PwsConfig = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config.station_id, "IRIODE90");
        assert_eq!(config.api_key(), Some("k"));
    }
}
