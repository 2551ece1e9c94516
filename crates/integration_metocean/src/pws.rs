//! weather.com personal weather station client

use std::time::Duration;

use tracing::{debug, instrument};

use crate::config::PwsConfig;
use crate::error::MetoceanError;
use crate::models::{PwsEnvelope, RawObservation};
use crate::resolver::join_url;
use crate::transport::{HttpTransport, HttpTransportConfig, RequestOptions, Transport};

const CURRENT_PATH: &str = "v2/pws/observations/current";

/// Client for the PWS current-conditions endpoint
#[derive(Debug, Clone)]
pub struct PwsClient<T = HttpTransport> {
    transport: T,
    config: PwsConfig,
}

impl PwsClient<HttpTransport> {
    /// Create a client backed by `reqwest`
    ///
    /// A missing API key is not an error here; it is reported by
    /// [`PwsClient::current`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: PwsConfig) -> Result<Self, MetoceanError> {
        let transport = HttpTransport::with_config(
            &HttpTransportConfig::default().with_timeout(Duration::from_secs(config.timeout_secs)),
        )?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> PwsClient<T> {
    /// Create a client over an arbitrary transport
    pub const fn with_transport(config: PwsConfig, transport: T) -> Self {
        Self { transport, config }
    }

    /// Current observation of the configured station, flattened into raw
    /// field names (`obsTimeLocal`, `winddir`, `windSpeed`, ...)
    #[instrument(skip(self), fields(station_id = %self.config.station_id))]
    pub async fn current(&self) -> Result<RawObservation, MetoceanError> {
        let api_key = self.config.api_key().ok_or_else(|| {
            MetoceanError::Configuration("PWS API key is not configured".to_string())
        })?;

        let url = join_url(&self.config.base_url, CURRENT_PATH);
        let options = RequestOptions::get()
            .with_query("stationId", &self.config.station_id)
            .with_query("format", "json")
            .with_query("units", "s")
            .with_query("numericPrecision", "decimal")
            .with_query("apiKey", api_key);

        let payload = self.transport.fetch_json(&url, &options).await?;
        let envelope: PwsEnvelope = serde_json::from_value(payload)
            .map_err(|e| MetoceanError::MalformedPayload(format!("PWS response: {e}")))?;

        let observation = envelope.observations.into_iter().next().ok_or_else(|| {
            MetoceanError::MalformedPayload("no observation data in PWS response".to_string())
        })?;

        debug!(obs_time = ?observation.obs_time_local, "PWS observation fetched");
        Ok(observation.into_raw())
    }
}
