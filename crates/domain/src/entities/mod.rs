//! Domain entities - Objects with identity and lifecycle

mod observation;
mod place;

pub use observation::CanonicalObservation;
pub use place::ActivityPlace;
