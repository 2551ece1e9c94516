//! Metocean data integration
//!
//! Clients for the SeaSpot API (location metadata, search and metocean
//! time series), the local weather station service and the weather.com
//! personal-weather-station API. Requests that may be served under several
//! routes go through [`resolver::EndpointResolver`], which tries candidate
//! URLs in priority order and keeps the first JSON success.

pub mod config;
pub mod error;
mod models;
pub mod pws;
pub mod resolver;
pub mod seaspot;
pub mod station;
pub mod transport;

pub use config::{PwsConfig, SeaSpotConfig, StationConfig};
pub use error::{MetoceanError, ResolveError, TransportError};
pub use models::RawObservation;
pub use pws::PwsClient;
pub use resolver::{EndpointCandidate, EndpointResolver, Resolution, Resolved};
pub use seaspot::SeaSpotClient;
pub use station::StationClient;
pub use transport::{HttpMethod, HttpTransport, HttpTransportConfig, RequestOptions, Transport};
