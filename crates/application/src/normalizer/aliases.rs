//! Upstream field aliases
//!
//! Each canonical field lists the upstream keys that may carry it, highest
//! priority first. The canonical key is always last so that a canonical
//! record, read back as raw input, normalizes to itself.

use serde_json::{Map, Value};

pub const TIMESTAMP: &[&str] = &["timestamp", "obsTimeLocal", "time", "date", "when"];
pub const WIND_SPEED: &[&str] = &["wspd10m", "windSpeed", "windSpeedMS"];
pub const WIND_DIRECTION: &[&str] = &["wdir10m", "winddir", "windDirectionDeg"];
pub const GUST_SPEED: &[&str] = &["gust10m", "gust", "wgust", "windGust", "gustSpeedMS"];
pub const TEMPERATURE: &[&str] = &["tmp2m", "temp", "temperatureC"];
pub const HUMIDITY: &[&str] = &["rh2m", "humidity", "humidityPct"];
pub const PRESSURE: &[&str] = &["pressure_hpa", "pressure", "pressureHPa"];
pub const PRECIPITATION: &[&str] = &[
    "prec_rate",
    "precip_mm",
    "precip",
    "precipRate",
    "precipitationMM",
];
pub const TIDE: &[&str] = &["tide", "tideM"];
pub const WAVE_HEIGHT: &[&str] = &["hs", "waveHeight", "waveHeightM"];
pub const WATER_TEMPERATURE: &[&str] = &["tsm", "waterTemperatureC"];
pub const WAVE_PERIOD: &[&str] = &["tp", "wavePeriodS"];
pub const WAVE_DIRECTION: &[&str] = &["dp", "waveDirectionDeg"];
pub const UV_INDEX: &[&str] = &["uv_rate", "uv", "uvIndex"];
pub const SOLAR_RADIATION: &[&str] = &["solarRadiation", "solarRadiationWm2"];

/// Every alias list, keyed by canonical field name
pub const ALIAS_TABLE: [(&str, &[&str]); 15] = [
    ("timestamp", TIMESTAMP),
    ("windSpeedMS", WIND_SPEED),
    ("windDirectionDeg", WIND_DIRECTION),
    ("gustSpeedMS", GUST_SPEED),
    ("temperatureC", TEMPERATURE),
    ("humidityPct", HUMIDITY),
    ("pressureHPa", PRESSURE),
    ("precipitationMM", PRECIPITATION),
    ("tideM", TIDE),
    ("waveHeightM", WAVE_HEIGHT),
    ("waterTemperatureC", WATER_TEMPERATURE),
    ("wavePeriodS", WAVE_PERIOD),
    ("waveDirectionDeg", WAVE_DIRECTION),
    ("uvIndex", UV_INDEX),
    ("solarRadiationWm2", SOLAR_RADIATION),
];

/// A numeric hit: which alias matched and its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericHit {
    pub key: &'static str,
    pub value: f64,
}

impl NumericHit {
    /// Whether the value came from the canonical key (last alias)
    pub fn is_canonical(&self, aliases: &[&str]) -> bool {
        aliases.last().is_some_and(|last| *last == self.key)
    }
}

/// First alias holding a finite number or numeric string
///
/// Nulls, booleans, objects and unparseable strings count as absent.
pub fn lookup_number(raw: &Map<String, Value>, aliases: &[&'static str]) -> Option<NumericHit> {
    aliases.iter().find_map(|key| {
        let value = match raw.get(*key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        value.is_finite().then_some(NumericHit { key: *key, value })
    })
}

/// First alias holding a usable timestamp value
pub fn lookup_value<'a>(raw: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|key| match raw.get(*key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        v @ (Value::String(_) | Value::Number(_)) => Some(v),
        _ => None,
    })
}
