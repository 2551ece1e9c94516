//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod metocean_port;
mod station_port;

#[cfg(test)]
pub use metocean_port::MockMetoceanPort;
pub use metocean_port::{MetoceanPayload, MetoceanPort};
#[cfg(test)]
pub use station_port::MockStationPort;
pub use station_port::StationPort;
