//! Weather station port
//!
//! Live observations from the local station service and the weather.com
//! personal weather station.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::normalizer::RawObservation;

/// Port for station observations
///
/// Observations are returned unnormalized; the local station reports
/// speeds in knots, the PWS in m/s.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StationPort: Send + Sync {
    /// Latest local station observation
    async fn now(&self) -> Result<RawObservation, ApplicationError>;

    /// Last `count` local station observations
    async fn history(&self, count: u32) -> Result<Vec<RawObservation>, ApplicationError>;

    /// Current PWS observation
    async fn pws_current(&self) -> Result<RawObservation, ApplicationError>;
}
