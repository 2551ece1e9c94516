//! Value Objects - Immutable, identity-less domain primitives

mod bearing;
mod date_range;
mod location_id;
mod speed;
mod wave_band;

pub use bearing::{Bearing, normalize_degrees};
pub use date_range::{DateRange, SERVICE_DATE_FORMAT};
pub use location_id::LocationId;
pub use speed::{KNOTS_PER_MS, SpeedUnit, WindBand, knots, knots_to_ms};
pub use wave_band::WaveBand;
