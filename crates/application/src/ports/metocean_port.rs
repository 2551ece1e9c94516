//! Metocean provider port
//!
//! Location metadata and metocean time series for a coastal location.

use async_trait::async_trait;
use domain::{ActivityPlace, DateRange, LocationId};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApplicationError;

/// Raw metocean payload together with the URL that served it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetoceanPayload {
    /// Endpoint that answered
    pub source_url: String,
    /// Unnormalized body
    pub payload: Value,
}

/// Port for the SeaSpot metocean provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MetoceanPort: Send + Sync {
    /// Metadata for one location
    async fn place(&self, id: LocationId) -> Result<ActivityPlace, ApplicationError>;

    /// Every known location
    async fn places(&self) -> Result<Vec<ActivityPlace>, ApplicationError>;

    /// Locations matching a free-text query
    async fn search_places(&self, text: &str) -> Result<Vec<ActivityPlace>, ApplicationError>;

    /// Metocean time series for a location
    async fn metocean(
        &self,
        id: LocationId,
        range: &DateRange,
    ) -> Result<MetoceanPayload, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn MetoceanPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn MetoceanPort>();
    }
}
