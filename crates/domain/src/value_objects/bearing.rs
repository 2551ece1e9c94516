//! Compass bearing value object
//!
//! A direction in degrees, always reduced into `[0, 360)`.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Bearing;
//!
//! let b = Bearing::new(370.0);
//! assert!((b.degrees() - 10.0).abs() < 1e-9);
//! assert_eq!(b.compass_point(), "N");
//!
//! // "blowing from" to "pointing toward"
//! let toward = Bearing::new(90.0).with_offset(180.0);
//! assert!((toward.degrees() - 270.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// 16-point compass rose, clockwise from north
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Width of one compass sector in degrees
const SECTOR_DEG: f64 = 22.5;

/// A direction in degrees within `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Bearing(f64);

impl Bearing {
    /// Create a bearing, reducing any finite input into `[0, 360)`
    ///
    /// Non-finite input yields north.
    #[must_use]
    pub fn new(degrees: f64) -> Self {
        Self(normalize_degrees(degrees))
    }

    /// The bearing in degrees
    #[must_use]
    pub const fn degrees(self) -> f64 {
        self.0
    }

    /// Rotate by `offset` degrees, staying in `[0, 360)`
    #[must_use]
    pub fn with_offset(self, offset: f64) -> Self {
        Self::new(self.0 + offset)
    }

    /// The opposite direction
    #[must_use]
    pub fn reversed(self) -> Self {
        self.with_offset(180.0)
    }

    /// Index of the 16-point compass sector containing this bearing
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sector(self) -> usize {
        // 0 <= self.0 < 360, so the floor is within 0..=16
        let bucket = (self.0 / SECTOR_DEG + 0.5).floor() as usize;
        bucket % COMPASS_POINTS.len()
    }

    /// 16-point compass label (N, NNE, NE, ...)
    #[must_use]
    pub fn compass_point(self) -> &'static str {
        COMPASS_POINTS[self.sector()]
    }
}

/// Reduce degrees into `[0, 360)`
///
/// `rem_euclid` can round tiny negative inputs up to exactly 360.0, which is
/// folded back to 0.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let reduced = degrees.rem_euclid(360.0);
    if reduced >= 360.0 || reduced == 0.0 {
        0.0
    } else {
        reduced
    }
}

impl Default for Bearing {
    fn default() -> Self {
        Self(0.0)
    }
}

impl From<f64> for Bearing {
    fn from(degrees: f64) -> Self {
        Self::new(degrees)
    }
}

impl From<Bearing> for f64 {
    fn from(b: Bearing) -> Self {
        b.0
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}° {}", self.0, self.compass_point())
    }
}
