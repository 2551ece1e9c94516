//! Canonical observation entity
//!
//! The fixed-shape record every display consumer reads, regardless of which
//! upstream produced the data.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Bearing, WaveBand, WindBand, knots};

/// A normalized metocean observation
///
/// Speeds are in metres per second, temperatures in Celsius, pressure in
/// hectopascal, precipitation in millimetres and heights in metres.
/// Speed-like, precipitation-like and radiation-like values are never
/// negative; wind and wave directions are in `[0, 360)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalObservation {
    /// Observation time as reported upstream (ISO-8601)
    pub timestamp: Option<String>,

    /// Sustained wind speed (m/s)
    #[serde(rename = "windSpeedMS")]
    pub wind_speed_ms: f64,

    /// Direction the wind blows from (degrees)
    pub wind_direction_deg: f64,

    /// Gust speed (m/s)
    #[serde(rename = "gustSpeedMS")]
    pub gust_speed_ms: f64,

    /// Air temperature (°C)
    #[serde(rename = "temperatureC")]
    pub temperature_c: Option<f64>,

    /// Relative humidity (%)
    pub humidity_pct: Option<f64>,

    /// Atmospheric pressure (hPa)
    #[serde(rename = "pressureHPa")]
    pub pressure_hpa: Option<f64>,

    /// Precipitation rate or accumulation (mm)
    #[serde(rename = "precipitationMM")]
    pub precipitation_mm: f64,

    /// Instantaneous tide level (m)
    #[serde(rename = "tideM")]
    pub tide_m: Option<f64>,

    /// Significant wave height (m)
    #[serde(rename = "waveHeightM")]
    pub wave_height_m: Option<f64>,

    /// Sea surface temperature (°C)
    #[serde(rename = "waterTemperatureC")]
    pub water_temperature_c: Option<f64>,

    /// Peak wave period (s)
    #[serde(rename = "wavePeriodS")]
    pub wave_period_s: Option<f64>,

    /// Peak wave direction (degrees)
    pub wave_direction_deg: Option<f64>,

    /// UV index
    pub uv_index: Option<f64>,

    /// Solar radiation (W/m²)
    #[serde(rename = "solarRadiationWm2")]
    pub solar_radiation_wm2: Option<f64>,
}

impl Default for CanonicalObservation {
    fn default() -> Self {
        Self {
            timestamp: None,
            wind_speed_ms: 0.0,
            wind_direction_deg: 0.0,
            gust_speed_ms: 0.0,
            temperature_c: None,
            humidity_pct: None,
            pressure_hpa: None,
            precipitation_mm: 0.0,
            tide_m: None,
            wave_height_m: None,
            water_temperature_c: None,
            wave_period_s: None,
            wave_direction_deg: None,
            uv_index: None,
            solar_radiation_wm2: None,
        }
    }
}

impl CanonicalObservation {
    /// Wind speed in knots
    #[must_use]
    pub fn wind_speed_knots(&self) -> f64 {
        knots(self.wind_speed_ms)
    }

    /// Gust speed in knots
    #[must_use]
    pub fn gust_speed_knots(&self) -> f64 {
        knots(self.gust_speed_ms)
    }

    /// Wind direction as a bearing
    #[must_use]
    pub fn wind_bearing(&self) -> Bearing {
        Bearing::new(self.wind_direction_deg)
    }

    /// Wave height with a zero default, for chart series that cannot hold gaps
    #[must_use]
    pub fn wave_height_or_zero(&self) -> f64 {
        self.wave_height_m.unwrap_or(0.0)
    }

    /// Intensity band of the sustained wind
    #[must_use]
    pub fn wind_band(&self) -> WindBand {
        WindBand::from_knots(self.wind_speed_knots())
    }

    /// Size band of the significant wave height
    #[must_use]
    pub fn wave_band(&self) -> WaveBand {
        WaveBand::from_height(self.wave_height_m)
    }

    /// One-line human summary
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!(
            "wind {:.1} kn {} (gust {:.1} kn)",
            self.wind_speed_knots(),
            self.wind_bearing().compass_point(),
            self.gust_speed_knots()
        );
        if let Some(t) = self.temperature_c {
            out.push_str(&format!(", {t:.1}°C"));
        }
        if let Some(hs) = self.wave_height_m {
            out.push_str(&format!(", waves {hs:.1} m"));
        }
        if let Some(tide) = self.tide_m {
            out.push_str(&format!(", tide {tide:.2} m"));
        }
        out
    }
}
