//! Application layer - Use cases and orchestration
//!
//! Normalizes upstream observations, defines the provider ports and builds
//! conditions snapshots, either on demand or from the periodic poller.
//! Adapters implementing the ports live in the infrastructure layer.

pub mod error;
pub mod normalizer;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use normalizer::{
    NormalizeError, NormalizeOptions, ObservationSeries, RawObservation, SeriesEntry, normalize,
    normalize_with,
};
pub use ports::*;
pub use services::*;
