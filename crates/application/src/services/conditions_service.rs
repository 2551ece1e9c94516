//! Conditions service
//!
//! Fetches location metadata and metocean data through the ports and
//! normalizes them into a [`ConditionsSnapshot`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{ActivityPlace, CanonicalObservation, DateRange, LocationId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::normalizer::{NormalizeOptions, ObservationSeries, SeriesEntry, normalize_map};
use crate::ports::{MetoceanPort, StationPort};

/// Everything a conditions view needs for one location, built fresh on
/// every fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionsSnapshot {
    /// Location the snapshot is for
    pub location_id: LocationId,
    /// Location metadata, when the metadata routes answered
    pub place: Option<ActivityPlace>,
    /// Entry nearest to `fetched_at`
    pub current: CanonicalObservation,
    /// Whole series in display order
    pub series: Vec<SeriesEntry>,
    /// Endpoint that served the metocean data
    pub source_url: String,
    /// When the snapshot was built
    pub fetched_at: DateTime<Utc>,
}

/// Builds conditions snapshots and station readings
pub struct ConditionsService {
    metocean: Arc<dyn MetoceanPort>,
    station: Option<Arc<dyn StationPort>>,
}

impl std::fmt::Debug for ConditionsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionsService")
            .field("has_station", &self.station.is_some())
            .finish_non_exhaustive()
    }
}

impl ConditionsService {
    /// Create a service over a metocean provider
    pub fn new(metocean: Arc<dyn MetoceanPort>) -> Self {
        Self {
            metocean,
            station: None,
        }
    }

    /// Attach the station provider
    #[must_use]
    pub fn with_station(mut self, station: Arc<dyn StationPort>) -> Self {
        self.station = Some(station);
        self
    }

    /// Snapshot for a location, current entry picked relative to now
    pub async fn snapshot(
        &self,
        location_id: LocationId,
        range: &DateRange,
    ) -> Result<ConditionsSnapshot, ApplicationError> {
        self.snapshot_at(location_id, range, Utc::now()).await
    }

    /// Snapshot for a location, current entry picked relative to `now`
    ///
    /// Missing metadata is tolerated; missing metocean data is not.
    #[instrument(skip(self, range), fields(location_id = %location_id))]
    pub async fn snapshot_at(
        &self,
        location_id: LocationId,
        range: &DateRange,
        now: DateTime<Utc>,
    ) -> Result<ConditionsSnapshot, ApplicationError> {
        let place = match self.metocean.place(location_id).await {
            Ok(place) => Some(place),
            Err(e) => {
                warn!(error = %e, "Location metadata unavailable");
                None
            },
        };

        let metocean = self.metocean.metocean(location_id, range).await?;
        let series = ObservationSeries::from_payload(&metocean.payload)?;

        let current = series
            .current_at(now)
            .map(|entry| entry.observation.clone())
            .ok_or_else(|| {
                ApplicationError::MalformedPayload(format!(
                    "no observations in payload from {}",
                    metocean.source_url
                ))
            })?;

        debug!(
            entries = series.len(),
            source_url = %metocean.source_url,
            "Conditions snapshot built"
        );

        Ok(ConditionsSnapshot {
            location_id,
            place,
            current,
            series: series.into_entries(),
            source_url: metocean.source_url,
            fetched_at: now,
        })
    }

    /// Metadata for one location
    pub async fn place(&self, id: LocationId) -> Result<ActivityPlace, ApplicationError> {
        self.metocean.place(id).await
    }

    /// Every known location
    pub async fn places(&self) -> Result<Vec<ActivityPlace>, ApplicationError> {
        self.metocean.places().await
    }

    /// Free-text location search; blank queries return nothing
    pub async fn search_places(&self, text: &str) -> Result<Vec<ActivityPlace>, ApplicationError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.metocean.search_places(text).await
    }

    /// Latest local station observation (speeds reported in knots)
    #[instrument(skip(self))]
    pub async fn station_now(&self) -> Result<CanonicalObservation, ApplicationError> {
        let raw = self.station()?.now().await?;
        Ok(normalize_map(&raw, &NormalizeOptions::knots()))
    }

    /// Last `count` local station observations
    #[instrument(skip(self))]
    pub async fn station_history(&self, count: u32) -> Result<ObservationSeries, ApplicationError> {
        let raw = self.station()?.history(count).await?;
        Ok(ObservationSeries::from_observations(
            raw.iter(),
            &NormalizeOptions::knots(),
        ))
    }

    /// Current PWS observation (speeds reported in m/s)
    #[instrument(skip(self))]
    pub async fn pws_now(&self) -> Result<CanonicalObservation, ApplicationError> {
        let raw = self.station()?.pws_current().await?;
        Ok(normalize_map(&raw, &NormalizeOptions::default()))
    }

    fn station(&self) -> Result<&Arc<dyn StationPort>, ApplicationError> {
        self.station.as_ref().ok_or_else(|| {
            ApplicationError::Configuration("station provider is not configured".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::normalizer::RawObservation;
    use crate::ports::{MetoceanPayload, MockMetoceanPort, MockStationPort};

    fn raw(value: serde_json::Value) -> RawObservation {
        value.as_object().cloned().unwrap()
    }

    fn metocean_payload() -> MetoceanPayload {
        MetoceanPayload {
            source_url: "http://cache/metocean/info".to_string(),
            payload: json!({
                "2024-01-01T06:00": {"wspd10m": 6.0, "hs": 1.2},
                "2024-01-01T00:00": {"wspd10m": 2.0, "hs": 0.4},
                "2024-01-01T03:00": {"wspd10m": 4.0, "hs": 0.8}
            }),
        }
    }

    #[tokio::test]
    async fn snapshot_picks_entry_nearest_now() {
        let mut mock = MockMetoceanPort::new();
        mock.expect_place()
            .returning(|id| Ok(ActivityPlace::new(id, "Joaquina")));
        mock.expect_metocean()
            .returning(|_, _| Ok(metocean_payload()));

        let service = ConditionsService::new(Arc::new(mock));
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 4, 0, 0).unwrap();
        let snapshot = service
            .snapshot_at(LocationId::new(2535), &DateRange::unbounded(), now)
            .await
            .unwrap();

        assert_eq!(snapshot.place.unwrap().name, "Joaquina");
        assert_eq!(snapshot.current.wave_height_m, Some(0.8));
        assert_eq!(snapshot.series.len(), 3);
        assert_eq!(
            snapshot.series[0].observation.timestamp.as_deref(),
            Some("2024-01-01T00:00")
        );
        assert_eq!(snapshot.source_url, "http://cache/metocean/info");
        assert_eq!(snapshot.fetched_at, now);
    }

    #[tokio::test]
    async fn snapshot_tolerates_missing_metadata() {
        let mut mock = MockMetoceanPort::new();
        mock.expect_place().returning(|_| {
            Err(ApplicationError::ExhaustedCandidates {
                attempts: 4,
                last_error: "HTTP 404".into(),
            })
        });
        mock.expect_metocean()
            .returning(|_, _| Ok(metocean_payload()));

        let service = ConditionsService::new(Arc::new(mock));
        let snapshot = service
            .snapshot(LocationId::new(1), &DateRange::unbounded())
            .await
            .unwrap();

        assert!(snapshot.place.is_none());
    }

    #[tokio::test]
    async fn snapshot_fails_when_metocean_exhausted() {
        let mut mock = MockMetoceanPort::new();
        mock.expect_place()
            .returning(|id| Ok(ActivityPlace::new(id, "X")));
        mock.expect_metocean().returning(|_, _| {
            Err(ApplicationError::ExhaustedCandidates {
                attempts: 6,
                last_error: "HTTP 500".into(),
            })
        });

        let service = ConditionsService::new(Arc::new(mock));
        let err = service
            .snapshot(LocationId::new(1), &DateRange::unbounded())
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn snapshot_of_empty_payload_is_malformed() {
        let mut mock = MockMetoceanPort::new();
        mock.expect_place()
            .returning(|id| Ok(ActivityPlace::new(id, "X")));
        mock.expect_metocean().returning(|_, _| {
            Ok(MetoceanPayload {
                source_url: "http://api/metocean".into(),
                payload: json!({}),
            })
        });

        let service = ConditionsService::new(Arc::new(mock));
        let err = service
            .snapshot(LocationId::new(1), &DateRange::unbounded())
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn blank_search_makes_no_call() {
        let mut mock = MockMetoceanPort::new();
        mock.expect_search_places().never();

        let service = ConditionsService::new(Arc::new(mock));
        assert!(service.search_places("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn station_now_converts_knots() {
        let mut station = MockStationPort::new();
        station
            .expect_now()
            .returning(|| Ok(raw(json!({"windSpeed": 19.43844, "winddir": 90}))));

        let service = ConditionsService::new(Arc::new(MockMetoceanPort::new()))
            .with_station(Arc::new(station));
        let obs = service.station_now().await.unwrap();

        assert!((obs.wind_speed_ms - 10.0).abs() < 1e-6);
        assert!((obs.wind_direction_deg - 90.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn station_history_keeps_order() {
        let mut station = MockStationPort::new();
        station.expect_history().returning(|n| {
            Ok((0..n)
                .map(|i| raw(json!({"timestamp": format!("2024-01-01T0{i}:00"), "windSpeed": 0})))
                .collect())
        });

        let service = ConditionsService::new(Arc::new(MockMetoceanPort::new()))
            .with_station(Arc::new(station));
        let history = service.station_history(3).await.unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(
            history.first().unwrap().observation.timestamp.as_deref(),
            Some("2024-01-01T00:00")
        );
    }

    #[tokio::test]
    async fn pws_now_keeps_metric_speeds() {
        let mut station = MockStationPort::new();
        station
            .expect_pws_current()
            .returning(|| Ok(raw(json!({"windSpeed": 3.5, "obsTimeLocal": "2024-05-01 10:00:00"}))));

        let service = ConditionsService::new(Arc::new(MockMetoceanPort::new()))
            .with_station(Arc::new(station));
        let obs = service.pws_now().await.unwrap();

        assert!((obs.wind_speed_ms - 3.5).abs() < 1e-9);
        assert!(obs.wave_height_m.is_none());
    }

    #[tokio::test]
    async fn station_calls_without_provider_are_configuration_errors() {
        let service = ConditionsService::new(Arc::new(MockMetoceanPort::new()));
        assert!(matches!(
            service.station_now().await,
            Err(ApplicationError::Configuration(_))
        ));
        assert!(matches!(
            service.pws_now().await,
            Err(ApplicationError::Configuration(_))
        ));
    }
}
