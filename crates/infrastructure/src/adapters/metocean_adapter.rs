//! Metocean adapter - Implements MetoceanPort using the SeaSpot client

use application::ApplicationError;
use application::ports::{MetoceanPayload, MetoceanPort};
use async_trait::async_trait;
use domain::{ActivityPlace, DateRange, LocationId};
use integration_metocean::{SeaSpotClient, SeaSpotConfig};
use tracing::{debug, instrument};

use super::map_error;

/// Adapter for the SeaSpot API and metocean cache
pub struct MetoceanAdapter {
    client: SeaSpotClient,
}

impl std::fmt::Debug for MetoceanAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetoceanAdapter")
            .field("api_base_url", &self.client.config().api_base_url)
            .field("cache_base_url", &self.client.config().cache_base_url)
            .finish()
    }
}

impl MetoceanAdapter {
    /// Create an adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: SeaSpotConfig) -> Result<Self, ApplicationError> {
        let client = SeaSpotClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MetoceanPort for MetoceanAdapter {
    async fn place(&self, id: LocationId) -> Result<ActivityPlace, ApplicationError> {
        self.client.place(id).await.map_err(map_error)
    }

    async fn places(&self) -> Result<Vec<ActivityPlace>, ApplicationError> {
        self.client.places().await.map_err(map_error)
    }

    async fn search_places(&self, text: &str) -> Result<Vec<ActivityPlace>, ApplicationError> {
        self.client.search_places(text).await.map_err(map_error)
    }

    #[instrument(skip(self, range), fields(location_id = %id))]
    async fn metocean(
        &self,
        id: LocationId,
        range: &DateRange,
    ) -> Result<MetoceanPayload, ApplicationError> {
        let result = self.client.metocean(id, range).await.map_err(map_error);

        if let Err(e) = &result {
            debug!(error = %e, "Failed to fetch metocean data");
        }

        result.map(|resolved| MetoceanPayload {
            source_url: resolved.url,
            payload: resolved.payload,
        })
    }
}
