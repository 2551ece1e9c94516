//! Wave height bands used by the forecast heatmap

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of significant wave height
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveBand {
    /// No wave height reported
    Unknown,
    /// Up to 0.5 m
    Flat,
    /// Up to 1.0 m
    Small,
    /// Up to 1.5 m
    Medium,
    /// Up to 2.5 m
    Large,
    /// Above 2.5 m
    Huge,
}

impl WaveBand {
    /// Classify a wave height in metres
    #[must_use]
    pub fn from_height(height_m: Option<f64>) -> Self {
        match height_m {
            None => Self::Unknown,
            Some(h) if h <= 0.5 => Self::Flat,
            Some(h) if h <= 1.0 => Self::Small,
            Some(h) if h <= 1.5 => Self::Medium,
            Some(h) if h <= 2.5 => Self::Large,
            Some(_) => Self::Huge,
        }
    }

    /// Heatmap cell color for the band
    #[must_use]
    pub const fn hex_color(self) -> &'static str {
        match self {
            Self::Unknown => "#eeeeee",
            Self::Flat => "#d0f0ff",
            Self::Small => "#9fe6ff",
            Self::Medium => "#fff3b0",
            Self::Large => "#ffc28e",
            Self::Huge => "#ff9a9a",
        }
    }
}

impl fmt::Display for WaveBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Flat => "flat",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
        };
        f.write_str(s)
    }
}
