//! Poll loop configuration.

use std::time::Duration;

use domain::LocationId;
use serde::{Deserialize, Serialize};

/// Poll loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between poll cycles (default: 60)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Location shown when none is given (default: 2535)
    #[serde(default = "default_location_id")]
    pub default_location_id: u64,

    /// Station history length (default: 24)
    #[serde(default = "default_history_count")]
    pub history_count: u32,
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_location_id() -> u64 {
    2535
}

const fn default_history_count() -> u32 {
    24
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            default_location_id: default_location_id(),
            history_count: default_history_count(),
        }
    }
}

impl PollConfig {
    /// Poll interval, never shorter than one second
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    /// Default location as a domain id
    #[must_use]
    pub const fn default_location(&self) -> LocationId {
        LocationId::new(self.default_location_id)
    }
}
