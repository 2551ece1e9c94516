//! Activity place (coastal location) entity

use serde::{Deserialize, Serialize};

use crate::value_objects::LocationId;

/// A coastal location the dashboard can show conditions for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPlace {
    /// Upstream location identifier
    pub id: LocationId,

    /// Display name
    pub name: String,

    /// State (UF) the place belongs to
    pub state: Option<String>,

    /// Municipality the place belongs to
    pub municipality: Option<String>,

    /// Latitude in degrees
    pub latitude: Option<f64>,

    /// Longitude in degrees
    pub longitude: Option<f64>,

    /// Whether the place is a surf break
    pub is_raia: bool,
}

impl ActivityPlace {
    /// Create a place with only an id and a name
    #[must_use]
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            state: None,
            municipality: None,
            latitude: None,
            longitude: None,
            is_raia: false,
        }
    }

    /// "Municipality - State" label, when both are known
    #[must_use]
    pub fn region_label(&self) -> Option<String> {
        match (&self.municipality, &self.state) {
            (Some(m), Some(s)) => Some(format!("{m} - {s}")),
            (Some(m), None) => Some(m.clone()),
            (None, Some(s)) => Some(s.clone()),
            (None, None) => None,
        }
    }

    /// Coordinates as a `(latitude, longitude)` pair, when both are known
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl std::fmt::Display for ActivityPlace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.region_label() {
            Some(region) => write!(f, "{} ({region})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
