//! Wind speed units and intensity bands

use serde::{Deserialize, Serialize};
use std::fmt;

/// Knots per metre-per-second
pub const KNOTS_PER_MS: f64 = 1.943_844;

/// Convert metres per second to knots
///
/// ```
/// use domain::value_objects::knots;
///
/// assert!((knots(1.0) - 1.943844).abs() < 1e-6);
/// ```
#[must_use]
pub fn knots(ms: f64) -> f64 {
    ms * KNOTS_PER_MS
}

/// Convert knots to metres per second
#[must_use]
pub fn knots_to_ms(kn: f64) -> f64 {
    kn / KNOTS_PER_MS
}

/// Unit an upstream reports wind speeds in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    /// Metres per second
    #[default]
    MetersPerSecond,
    /// Knots
    Knots,
}

impl SpeedUnit {
    /// Convert a value in this unit to metres per second
    #[must_use]
    pub fn to_ms(self, value: f64) -> f64 {
        match self {
            Self::MetersPerSecond => value,
            Self::Knots => knots_to_ms(value),
        }
    }

    /// Short unit label
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::MetersPerSecond => "m/s",
            Self::Knots => "kn",
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Wind intensity band, as used for wind barb coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindBand {
    /// Below 5 knots
    Light,
    /// 5 to 10 knots
    Moderate,
    /// 10 to 15 knots
    Fresh,
    /// 15 knots and above
    Strong,
}

impl WindBand {
    /// Classify a wind speed given in knots
    #[must_use]
    pub fn from_knots(kn: f64) -> Self {
        if kn < 5.0 {
            Self::Light
        } else if kn < 10.0 {
            Self::Moderate
        } else if kn < 15.0 {
            Self::Fresh
        } else {
            Self::Strong
        }
    }

    /// Display color for the band
    #[must_use]
    pub const fn hex_color(self) -> &'static str {
        match self {
            Self::Light => "#4da6ff",
            Self::Moderate => "#7cc4c9",
            Self::Fresh => "#ff9800",
            Self::Strong => "#ff6b6b",
        }
    }
}

impl fmt::Display for WindBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Fresh => "fresh",
            Self::Strong => "strong",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_ms_in_knots() {
        assert!((knots(1.0) - 1.943_844).abs() < 1e-6);
        assert!(knots(0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn knots_round_trip() {
        assert!((knots_to_ms(knots(7.5)) - 7.5).abs() < 1e-9);
    }

    #[test]
    fn speed_unit_conversion() {
        assert!((SpeedUnit::MetersPerSecond.to_ms(3.0) - 3.0).abs() < f64::EPSILON);
        assert!((SpeedUnit::Knots.to_ms(KNOTS_PER_MS) - 1.0).abs() < 1e-9);
        assert_eq!(SpeedUnit::default(), SpeedUnit::MetersPerSecond);
        assert_eq!(SpeedUnit::Knots.to_string(), "kn");
    }

    #[test]
    fn wind_band_thresholds() {
        assert_eq!(WindBand::from_knots(0.0), WindBand::Light);
        assert_eq!(WindBand::from_knots(4.99), WindBand::Light);
        assert_eq!(WindBand::from_knots(5.0), WindBand::Moderate);
        assert_eq!(WindBand::from_knots(10.0), WindBand::Fresh);
        assert_eq!(WindBand::from_knots(15.0), WindBand::Strong);
        assert_eq!(WindBand::Strong.hex_color(), "#ff6b6b");
    }

    #[test]
    fn speed_unit_serde() {
        let unit: SpeedUnit = serde_json::from_str("\"knots\"").unwrap();
        assert_eq!(unit, SpeedUnit::Knots);
    }
}
