//! SeaSpot API client
//!
//! Location metadata, location search and the metocean time series. Every
//! call goes through the [`EndpointResolver`] because deployed backends
//! disagree on route names.

use std::time::Duration;

use domain::{ActivityPlace, DateRange, LocationId};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::SeaSpotConfig;
use crate::error::MetoceanError;
use crate::models::PlaceRecord;
use crate::resolver::{EndpointResolver, Resolved, render_path};
use crate::transport::{HttpTransport, HttpTransportConfig, RequestOptions, Transport};

/// Location metadata routes, in priority order
pub const PLACE_PATHS: [&str; 4] = [
    "api/localidades/{location_id}",
    "api/locality/{location_id}",
    "localidades/{location_id}",
    "locality/{location_id}",
];

/// Location listing routes, in priority order
pub const PLACES_PATHS: [&str; 2] = ["api/localidades", "localidades"];

/// Location search routes, in priority order
pub const SEARCH_PATHS: [&str; 2] = ["api/localidades/search", "localidades/search"];

/// Metocean routes, in priority order
pub const METOCEAN_PATHS: [&str; 3] = ["metocean/info", "metocean_info", "metocean"];

/// Client for the SeaSpot API and its metocean cache
#[derive(Debug, Clone)]
pub struct SeaSpotClient<T = HttpTransport> {
    resolver: EndpointResolver<T>,
    config: SeaSpotConfig,
}

impl SeaSpotClient<HttpTransport> {
    /// Create a client backed by `reqwest`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: SeaSpotConfig) -> Result<Self, MetoceanError> {
        let transport = HttpTransport::with_config(
            &HttpTransportConfig::default().with_timeout(Duration::from_secs(config.timeout_secs)),
        )?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> SeaSpotClient<T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(config: SeaSpotConfig, transport: T) -> Self {
        let resolver = EndpointResolver::new(transport, config.api_base_url.clone());
        Self { resolver, config }
    }

    /// Client configuration
    pub const fn config(&self) -> &SeaSpotConfig {
        &self.config
    }

    /// Fetch metadata for one location
    #[instrument(skip(self), fields(location_id = %id))]
    pub async fn place(&self, id: LocationId) -> Result<ActivityPlace, MetoceanError> {
        let id_str = id.to_string();
        let paths: Vec<String> = PLACE_PATHS
            .iter()
            .map(|p| render_path(p, &[("location_id", &id_str)]))
            .collect();

        let resolved = self
            .resolver
            .resolve("", &paths, &RequestOptions::get())
            .await
            .into_result()?;

        debug!(url = %resolved.url, "Location metadata resolved");
        parse_place(resolved.payload)
    }

    /// List every known location
    #[instrument(skip(self))]
    pub async fn places(&self) -> Result<Vec<ActivityPlace>, MetoceanError> {
        let resolved = self
            .resolver
            .resolve("", &PLACES_PATHS, &RequestOptions::get())
            .await
            .into_result()?;
        parse_place_list(resolved.payload)
    }

    /// Search locations by name, state or municipality
    ///
    /// The upstream answers with an array, a single record, or an empty
    /// object when nothing matched.
    #[instrument(skip(self))]
    pub async fn search_places(&self, text: &str) -> Result<Vec<ActivityPlace>, MetoceanError> {
        let options = RequestOptions::get()
            .with_query("text", text)
            .with_query("check_estado", true)
            .with_query("check_municipio", true);

        let resolved = self
            .resolver
            .resolve("", &SEARCH_PATHS, &options)
            .await
            .into_result()?;
        parse_place_list(resolved.payload)
    }

    /// Fetch the metocean payload for a location
    ///
    /// Tried on the cache base first, then on the API base.
    #[instrument(skip(self, range), fields(location_id = %id))]
    pub async fn metocean(
        &self,
        id: LocationId,
        range: &DateRange,
    ) -> Result<Resolved, MetoceanError> {
        let options = RequestOptions::get()
            .with_query("location_id", id)
            .with_query_pairs(range.query_pairs());

        let resolved = self
            .resolver
            .resolve_across(&self.config.metocean_bases(), &METOCEAN_PATHS, &options)
            .await
            .into_result()?;

        debug!(url = %resolved.url, "Metocean data resolved");
        Ok(resolved)
    }
}

fn parse_place(payload: Value) -> Result<ActivityPlace, MetoceanError> {
    serde_json::from_value::<PlaceRecord>(payload)
        .map(ActivityPlace::from)
        .map_err(|e| MetoceanError::MalformedPayload(format!("location record: {e}")))
}

fn parse_place_list(payload: Value) -> Result<Vec<ActivityPlace>, MetoceanError> {
    match payload {
        Value::Array(items) => items.into_iter().map(parse_place).collect(),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        Value::Object(map) => parse_place(Value::Object(map)).map(|p| vec![p]),
        other => Err(MetoceanError::MalformedPayload(format!(
            "expected location list, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn place_list_accepts_array() {
        let places = parse_place_list(json!([
            {"id": 1, "nome": "A"},
            {"id": 2, "nome": "B"}
        ]))
        .unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[1].name, "B");
    }

    #[test]
    fn place_list_accepts_single_object() {
        let places = parse_place_list(json!({"id": 7, "nome": "Solo"})).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, LocationId::new(7));
    }

    #[test]
    fn place_list_accepts_empty_object() {
        assert!(parse_place_list(json!({})).unwrap().is_empty());
    }

    #[test]
    fn place_list_rejects_scalars() {
        assert!(matches!(
            parse_place_list(json!("nope")),
            Err(MetoceanError::MalformedPayload(_))
        ));
    }

    #[test]
    fn place_without_name_is_malformed() {
        assert!(matches!(
            parse_place(json!({"id": 1})),
            Err(MetoceanError::MalformedPayload(_))
        ));
    }

    #[test]
    fn client_creation() {
        assert!(SeaSpotClient::new(SeaSpotConfig::default()).is_ok());
    }
}
