//! Domain layer for SeaSpot
//!
//! Contains the canonical observation record, location metadata and the
//! small unit/bearing value objects the dashboard is built on.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
