//! Wire models for the upstream services

use domain::{ActivityPlace, LocationId};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Untyped upstream observation: field name to value
pub type RawObservation = Map<String, Value>;

/// Location record as served by the SeaSpot API
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlaceRecord {
    pub id: u64,
    #[serde(alias = "name")]
    pub nome: String,
    #[serde(default, alias = "state")]
    pub estado: Option<String>,
    #[serde(default, alias = "municipality")]
    pub municipio: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_raia: Option<bool>,
}

impl From<PlaceRecord> for ActivityPlace {
    fn from(record: PlaceRecord) -> Self {
        Self {
            id: LocationId::new(record.id),
            name: record.nome,
            state: record.estado,
            municipality: record.municipio,
            latitude: record.latitude,
            longitude: record.longitude,
            is_raia: record.is_raia.unwrap_or(false),
        }
    }
}

/// `GET /api/station/now`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StationNowEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub observation: Option<RawObservation>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /api/station/history?n=`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StationHistoryEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub observations: Option<Vec<RawObservation>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// weather.com PWS current-conditions response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PwsEnvelope {
    #[serde(default)]
    pub observations: Vec<PwsObservation>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PwsObservation {
    #[serde(default, rename = "stationID")]
    pub station_id: Option<String>,
    #[serde(default, rename = "obsTimeLocal")]
    pub obs_time_local: Option<String>,
    #[serde(default)]
    pub winddir: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default, rename = "solarRadiation")]
    pub solar_radiation: Option<f64>,
    #[serde(default)]
    pub uv: Option<f64>,
    #[serde(default)]
    pub metric_si: Option<PwsMetric>,
}

/// `units=s` block: speeds in m/s, temperature in °C, pressure in hPa
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PwsMetric {
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_gust: Option<f64>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub precip_rate: Option<f64>,
}

impl PwsObservation {
    /// Flatten into the field names the normalizer understands
    ///
    /// The PWS carries no tide or wave data, so those keys are left out.
    pub fn into_raw(self) -> RawObservation {
        let metric = self.metric_si.unwrap_or_default();
        let mut raw = RawObservation::new();

        if let Some(ts) = self.obs_time_local {
            raw.insert("obsTimeLocal".to_string(), Value::String(ts));
        }
        if let Some(id) = self.station_id {
            raw.insert("stationID".to_string(), Value::String(id));
        }

        let numeric = [
            ("winddir", self.winddir),
            ("windSpeed", metric.wind_speed),
            ("windGust", metric.wind_gust),
            ("temp", metric.temp),
            ("pressure", metric.pressure),
            ("precipRate", metric.precip_rate),
            ("humidity", self.humidity),
            ("solarRadiation", self.solar_radiation),
            ("uv", self.uv),
        ];
        for (key, value) in numeric {
            if let Some(v) = value.and_then(serde_json::Number::from_f64) {
                raw.insert(key.to_string(), Value::Number(v));
            }
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn place_record_maps_portuguese_fields() {
        let record: PlaceRecord = serde_json::from_value(json!({
            "id": 2535,
            "nome": "Praia da Joaquina",
            "estado": "SC",
            "municipio": "Florianópolis",
            "latitude": -27.63,
            "longitude": -48.45,
            "is_raia": true
        }))
        .unwrap();
        let place = ActivityPlace::from(record);

        assert_eq!(place.id, LocationId::new(2535));
        assert_eq!(place.name, "Praia da Joaquina");
        assert_eq!(place.state.as_deref(), Some("SC"));
        assert_eq!(place.municipality.as_deref(), Some("Florianópolis"));
        assert!(place.is_raia);
    }

    #[test]
    fn place_record_minimal() {
        let record: PlaceRecord = serde_json::from_value(json!({"id": 1, "name": "X"})).unwrap();
        let place = ActivityPlace::from(record);
        assert!(!place.is_raia);
        assert!(place.coordinates().is_none());
    }

    #[test]
    fn pws_observation_into_raw() {
        let envelope: PwsEnvelope = serde_json::from_value(json!({
            "observations": [{
                "stationID": "IRIODE90",
                "obsTimeLocal": "2024-05-01 10:00:00",
                "winddir": 135,
                "humidity": 80,
                "solarRadiation": 420.5,
                "uv": 3,
                "metric_si": {
                    "windSpeed": 4.2,
                    "windGust": 6.1,
                    "temp": 24.3,
                    "pressure": 1012.4,
                    "precipRate": 0.0
                }
            }]
        }))
        .unwrap();
        let raw = envelope.observations.into_iter().next().unwrap().into_raw();

        assert_eq!(raw["obsTimeLocal"], "2024-05-01 10:00:00");
        assert_eq!(raw["winddir"], 135.0);
        assert_eq!(raw["windSpeed"], 4.2);
        assert_eq!(raw["windGust"], 6.1);
        assert_eq!(raw["pressure"], 1012.4);
        assert!(!raw.contains_key("tide"));
        assert!(!raw.contains_key("waveHeight"));
    }

    #[test]
    fn pws_observation_without_metric_block() {
        let obs: PwsObservation = serde_json::from_value(json!({"winddir": 10})).unwrap();
        let raw = obs.into_raw();
        assert_eq!(raw.len(), 1);
        assert!(!raw.contains_key("windSpeed"));
    }
}
