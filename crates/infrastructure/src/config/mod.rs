//! Application configuration
//!
//! Split into focused sub-modules:
//! - `endpoints`: SeaSpot API, metocean cache and station base URLs
//! - `poll`: poll interval, default location, history length
//!
//! The PWS section reuses [`PwsConfig`] from the integration crate and the
//! telemetry section reuses [`TelemetryConfig`].

mod endpoints;
mod poll;

use std::fmt;
use std::path::Path;

use integration_metocean::PwsConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::telemetry::TelemetryConfig;

pub use endpoints::EndpointsConfig;
pub use poll::PollConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "SEASPOT";

/// Default configuration file name (extension resolved by `config`)
pub const DEFAULT_CONFIG_FILE: &str = "seaspot";

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Upstream base URLs
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// weather.com PWS settings
    #[serde(default)]
    pub pws: PwsConfig,

    /// Poll loop settings
    #[serde(default)]
    pub poll: PollConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `seaspot.{toml,yaml,json}` (optional) and
    /// `SEASPOT_*` environment variables
    ///
    /// Nested keys use `__`, e.g. `SEASPOT_ENDPOINTS__API_BASE_URL`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.warn_on_suspicious_values();
        Ok(config)
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn warn_on_suspicious_values(&self) {
        if self.environment == Environment::Production && self.pws.api_key().is_none() {
            warn!("PWS API key is not configured; PWS requests will fail");
        }
        if self.endpoints.api_base_url.is_empty() {
            warn!("endpoints.api_base_url is empty; SeaSpot requests have no base URL");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn environment_default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
    }

    #[test]
    fn environment_from_str() {
        assert_eq!(
            "prod".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "DEVELOPMENT".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.endpoints.api_base_url, "http://localhost:8000");
        assert!(config.endpoints.cache_base_url.is_empty());
        assert_eq!(config.endpoints.station_base_url, "http://localhost:5001");
        assert_eq!(config.endpoints.timeout_secs, 10);
        assert_eq!(config.pws.station_id, "IRIODE90");
        assert!(config.pws.api_key().is_none());
        assert_eq!(config.poll.interval(), Duration::from_secs(60));
        assert_eq!(config.poll.default_location_id, 2535);
        assert_eq!(config.poll.history_count, 24);
        assert!(!config.telemetry.json);
    }

    #[test]
    fn full_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            environment = "production"

            [endpoints]
            api_base_url = "https://api.seaspot.example"
            cache_base_url = "https://cache.seaspot.example"
            timeout_secs = 5

            [pws]
            station_id = "ISANTA12"
            api_key = "abc123"

            [poll]
            interval_secs = 30
            default_location_id = 42

            [telemetry]
            log_filter = "debug"
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(
            config.endpoints.seaspot().metocean_bases(),
            vec!["https://cache.seaspot.example", "https://api.seaspot.example"]
        );
        assert_eq!(config.endpoints.station().timeout_secs, 5);
        assert_eq!(config.pws.station_id, "ISANTA12");
        assert_eq!(config.pws.api_key(), Some("abc123"));
        assert_eq!(config.poll.default_location(), domain::LocationId::new(42));
        assert_eq!(config.telemetry.log_filter, "debug");
        assert!(config.telemetry.json);
    }

    #[test]
    fn zero_interval_is_raised_to_one_second() {
        let config = AppConfig::from_toml_str("[poll]\ninterval_secs = 0").unwrap();
        assert_eq!(config.poll.interval(), Duration::from_secs(1));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig::from_toml_str("[pws]\napi_key = \"hunter2\"").unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(AppConfig::load_from(Some(Path::new("/nonexistent/seaspot.toml"))).is_err());
    }
}
