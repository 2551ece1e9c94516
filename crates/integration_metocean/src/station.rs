//! Local weather station service client
//!
//! The station collector stores wind speed and gust in knots; callers
//! normalizing these observations must declare that unit.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::config::StationConfig;
use crate::error::MetoceanError;
use crate::models::{RawObservation, StationHistoryEnvelope, StationNowEnvelope};
use crate::resolver::join_url;
use crate::transport::{HttpTransport, HttpTransportConfig, RequestOptions, Transport};

const NOW_PATH: &str = "api/station/now";
const HISTORY_PATH: &str = "api/station/history";
const STATUS_SUCCESS: &str = "success";

/// Client for the local station service
#[derive(Debug, Clone)]
pub struct StationClient<T = HttpTransport> {
    transport: T,
    config: StationConfig,
}

impl StationClient<HttpTransport> {
    /// Create a client backed by `reqwest`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: StationConfig) -> Result<Self, MetoceanError> {
        let transport = HttpTransport::with_config(
            &HttpTransportConfig::default().with_timeout(Duration::from_secs(config.timeout_secs)),
        )?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> StationClient<T> {
    /// Create a client over an arbitrary transport
    pub const fn with_transport(config: StationConfig, transport: T) -> Self {
        Self { transport, config }
    }

    /// Latest observation
    #[instrument(skip(self))]
    pub async fn now(&self) -> Result<RawObservation, MetoceanError> {
        let url = join_url(&self.config.base_url, NOW_PATH);
        let payload = self.transport.fetch_json(&url, &RequestOptions::get()).await?;

        let envelope: StationNowEnvelope = serde_json::from_value(payload)
            .map_err(|e| MetoceanError::MalformedPayload(format!("station now: {e}")))?;
        check_status(envelope.status.as_deref(), envelope.message.as_deref())?;

        envelope
            .observation
            .ok_or_else(|| MetoceanError::Upstream("station returned no observation".to_string()))
    }

    /// Last `count` observations, oldest first as served
    #[instrument(skip(self))]
    pub async fn history(&self, count: u32) -> Result<Vec<RawObservation>, MetoceanError> {
        let url = join_url(&self.config.base_url, HISTORY_PATH);
        let options = RequestOptions::get().with_query("n", count);
        let payload = self.transport.fetch_json(&url, &options).await?;

        let envelope: StationHistoryEnvelope = serde_json::from_value(payload)
            .map_err(|e| MetoceanError::MalformedPayload(format!("station history: {e}")))?;
        check_status(envelope.status.as_deref(), envelope.message.as_deref())?;

        let observations = envelope.observations.ok_or_else(|| {
            MetoceanError::Upstream("station returned no observations".to_string())
        })?;
        debug!(
            count = observations.len(),
            source = envelope.source.as_deref().unwrap_or("unknown"),
            "Station history fetched"
        );
        Ok(observations)
    }
}

fn check_status(status: Option<&str>, message: Option<&str>) -> Result<(), MetoceanError> {
    match status {
        Some(STATUS_SUCCESS) => Ok(()),
        Some(other) => Err(MetoceanError::Upstream(format!(
            "station status {other}: {}",
            message.unwrap_or("no message")
        ))),
        None => Err(MetoceanError::Upstream(
            "station response has no status".to_string(),
        )),
    }
}
