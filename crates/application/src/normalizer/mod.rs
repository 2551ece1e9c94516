//! Observation normalization
//!
//! Maps the field names of every upstream (SeaSpot metocean, local station,
//! weather.com PWS) onto [`CanonicalObservation`] through the alias table
//! in [`aliases`].
//!
//! Policy:
//! - the first alias holding a number (or numeric string) wins
//! - wind speed, direction, gust and precipitation default to `0.0`;
//!   everything else defaults to null
//! - speed, gust, precipitation, wave height, UV and solar radiation are
//!   clamped to `>= 0`
//! - directions are reduced into `[0, 360)`
//! - numeric timestamps are Unix seconds, rendered as RFC 3339 UTC

pub mod aliases;
mod series;

use chrono::{DateTime, SecondsFormat};
use domain::{CanonicalObservation, SpeedUnit, normalize_degrees};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use series::{ObservationSeries, SeriesEntry};

use aliases::{NumericHit, lookup_number, lookup_value};

/// Untyped upstream observation
pub type RawObservation = Map<String, Value>;

/// Normalization failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// Input is not an object (or, for series, not an object or array)
    #[error("Malformed observation: {0}")]
    Malformed(String),
}

/// Per-upstream normalization settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Unit the upstream reports wind and gust speeds in
    #[serde(default)]
    pub wind_unit: SpeedUnit,
}

impl NormalizeOptions {
    /// Options for an upstream reporting speeds in knots
    pub const fn knots() -> Self {
        Self {
            wind_unit: SpeedUnit::Knots,
        }
    }
}

/// Normalize a raw JSON observation with default options
pub fn normalize(raw: &Value) -> Result<CanonicalObservation, NormalizeError> {
    normalize_with(raw, &NormalizeOptions::default())
}

/// Normalize a raw JSON observation
pub fn normalize_with(
    raw: &Value,
    options: &NormalizeOptions,
) -> Result<CanonicalObservation, NormalizeError> {
    match raw {
        Value::Object(map) => Ok(normalize_map(map, options)),
        other => Err(NormalizeError::Malformed(format!(
            "expected an object, got {}",
            json_kind(other)
        ))),
    }
}

/// Normalize an already-unwrapped observation map
pub fn normalize_map(raw: &RawObservation, options: &NormalizeOptions) -> CanonicalObservation {
    let number = |aliases: &[&'static str]| lookup_number(raw, aliases).map(|h| h.value);
    let speed = |aliases: &[&'static str]| {
        lookup_number(raw, aliases).map_or(0.0, |hit| {
            non_negative(convert_speed(hit, aliases, options.wind_unit))
        })
    };

    CanonicalObservation {
        timestamp: lookup_value(raw, aliases::TIMESTAMP).and_then(timestamp_string),
        wind_speed_ms: speed(aliases::WIND_SPEED),
        wind_direction_deg: number(aliases::WIND_DIRECTION).map_or(0.0, normalize_degrees),
        gust_speed_ms: speed(aliases::GUST_SPEED),
        temperature_c: number(aliases::TEMPERATURE),
        humidity_pct: number(aliases::HUMIDITY),
        pressure_hpa: number(aliases::PRESSURE),
        precipitation_mm: number(aliases::PRECIPITATION).map_or(0.0, non_negative),
        tide_m: number(aliases::TIDE),
        wave_height_m: number(aliases::WAVE_HEIGHT).map(non_negative),
        water_temperature_c: number(aliases::WATER_TEMPERATURE),
        wave_period_s: number(aliases::WAVE_PERIOD),
        wave_direction_deg: number(aliases::WAVE_DIRECTION).map(normalize_degrees),
        uv_index: number(aliases::UV_INDEX).map(non_negative),
        solar_radiation_wm2: number(aliases::SOLAR_RADIATION).map(non_negative),
    }
}

/// `max(0, v)`, with `-0.0` folded to `0.0`
fn non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

/// Canonical keys already hold m/s, whatever the upstream unit
fn convert_speed(hit: NumericHit, aliases: &[&str], unit: SpeedUnit) -> f64 {
    if hit.is_canonical(aliases) {
        hit.value
    } else {
        unit.to_ms(hit.value)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn timestamp_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            let secs = n.as_f64()?;
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9) as u32;
            DateTime::from_timestamp(whole as i64, nanos)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        },
        _ => None,
    }
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn negative_speed_and_wrapped_direction() {
        let obs = normalize(&json!({"wspd10m": -2, "wdir10m": 370})).unwrap();
        assert!(approx(obs.wind_speed_ms, 0.0));
        assert!(approx(obs.wind_direction_deg, 10.0));
    }

    #[test]
    fn negative_zero_is_clamped_to_positive_zero() {
        let obs = normalize(&json!({"windSpeed": -0.0, "precip": -0.0})).unwrap();
        assert!(obs.wind_speed_ms.is_sign_positive());
        assert!(obs.precipitation_mm.is_sign_positive());
    }

    #[test]
    fn seaspot_metocean_hour() {
        let obs = normalize(&json!({
            "wspd10m": 6.2,
            "wdir10m": 120,
            "gust10m": 8.4,
            "tmp2m": 24.5,
            "prec_rate": 0.2,
            "tide": 0.8,
            "hs": 1.3,
            "tp": 9.0,
            "dp": 160,
            "tsm": 22.1,
            "uv_rate": 7
        }))
        .unwrap();

        assert!(approx(obs.wind_speed_ms, 6.2));
        assert!(approx(obs.gust_speed_ms, 8.4));
        assert_eq!(obs.temperature_c, Some(24.5));
        assert_eq!(obs.tide_m, Some(0.8));
        assert_eq!(obs.wave_height_m, Some(1.3));
        assert_eq!(obs.wave_period_s, Some(9.0));
        assert_eq!(obs.wave_direction_deg, Some(160.0));
        assert_eq!(obs.water_temperature_c, Some(22.1));
        assert_eq!(obs.uv_index, Some(7.0));
        assert!(obs.humidity_pct.is_none());
        assert!(obs.pressure_hpa.is_none());
    }

    #[test]
    fn pws_style_fields() {
        let obs = normalize(&json!({
            "obsTimeLocal": "2024-05-01 10:00:00",
            "winddir": 200,
            "windSpeed": 3.5,
            "windGust": 5.2,
            "temp": 26.1,
            "pressure": 1010.2,
            "precipRate": 0.0,
            "humidity": 70,
            "solarRadiation": 512.3,
            "uv": 5
        }))
        .unwrap();

        assert_eq!(obs.timestamp.as_deref(), Some("2024-05-01 10:00:00"));
        assert!(approx(obs.gust_speed_ms, 5.2));
        assert_eq!(obs.pressure_hpa, Some(1010.2));
        assert_eq!(obs.humidity_pct, Some(70.0));
        assert_eq!(obs.solar_radiation_wm2, Some(512.3));
        assert!(obs.tide_m.is_none());
        assert!(obs.wave_height_m.is_none());
    }

    #[test]
    fn missing_fields_default_per_policy() {
        let obs = normalize(&json!({})).unwrap();
        assert_eq!(obs, CanonicalObservation::default());
    }

    #[test]
    fn knots_upstream_is_converted() {
        let raw = json!({"windSpeed": 1.943_844, "windGust": 3.887_688});
        let obs = normalize_with(&raw, &NormalizeOptions::knots()).unwrap();
        assert!((obs.wind_speed_ms - 1.0).abs() < 1e-6);
        assert!((obs.gust_speed_ms - 2.0).abs() < 1e-6);
    }

    #[test]
    fn knots_option_leaves_canonical_keys_alone() {
        let obs = normalize_with(&json!({"windSpeedMS": 4.0}), &NormalizeOptions::knots()).unwrap();
        assert!(approx(obs.wind_speed_ms, 4.0));
    }

    #[test]
    fn numeric_timestamp_is_unix_seconds() {
        let obs = normalize(&json!({"timestamp": 1_704_067_200})).unwrap();
        assert_eq!(obs.timestamp.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn wave_direction_is_reduced() {
        let obs = normalize(&json!({"dp": -90})).unwrap();
        assert_eq!(obs.wave_direction_deg, Some(270.0));
    }

    #[test]
    fn canonical_record_renormalizes_to_itself() {
        let first = normalize(&json!({
            "time": "2024-01-01T03:00",
            "wspd10m": 4.1,
            "wdir10m": 725,
            "gust": -1,
            "humidity": "65",
            "hs": 0.9
        }))
        .unwrap();
        let second = normalize(&serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn non_object_is_malformed() {
        assert!(matches!(
            normalize(&json!([1, 2])),
            Err(NormalizeError::Malformed(_))
        ));
        assert!(matches!(
            normalize(&json!("x")),
            Err(NormalizeError::Malformed(_))
        ));
    }
}
