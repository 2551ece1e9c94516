//! Station adapter - Implements StationPort using the station and PWS clients

use application::ApplicationError;
use application::ports::StationPort;
use application::RawObservation;
use async_trait::async_trait;
use integration_metocean::{PwsClient, PwsConfig, StationClient, StationConfig};

use super::map_error;

/// Adapter for the local station service and the weather.com PWS
pub struct StationAdapter {
    station: StationClient,
    pws: PwsClient,
}

impl std::fmt::Debug for StationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationAdapter").finish_non_exhaustive()
    }
}

impl StationAdapter {
    /// Create an adapter over both station sources
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to initialize.
    pub fn new(station: StationConfig, pws: PwsConfig) -> Result<Self, ApplicationError> {
        Ok(Self {
            station: StationClient::new(station).map_err(map_error)?,
            pws: PwsClient::new(pws).map_err(map_error)?,
        })
    }
}

#[async_trait]
impl StationPort for StationAdapter {
    async fn now(&self) -> Result<RawObservation, ApplicationError> {
        self.station.now().await.map_err(map_error)
    }

    async fn history(&self, count: u32) -> Result<Vec<RawObservation>, ApplicationError> {
        self.station.history(count).await.map_err(map_error)
    }

    async fn pws_current(&self) -> Result<RawObservation, ApplicationError> {
        self.pws.current().await.map_err(map_error)
    }
}
