//! Infrastructure adapters
//!
//! Adapters connect application ports to the metocean integration clients.

mod metocean_adapter;
mod station_adapter;

use application::ApplicationError;
use integration_metocean::{MetoceanError, ResolveError};

pub use metocean_adapter::MetoceanAdapter;
pub use station_adapter::StationAdapter;

/// Map an integration error to an application error
fn map_error(err: MetoceanError) -> ApplicationError {
    match err {
        MetoceanError::Resolve(ResolveError::Exhausted {
            attempts,
            last_error,
        }) => ApplicationError::ExhaustedCandidates {
            attempts,
            last_error: last_error.to_string(),
        },
        MetoceanError::Resolve(ResolveError::NoCandidates) => {
            ApplicationError::Internal("no endpoint candidates configured".to_string())
        },
        MetoceanError::Transport(e) => ApplicationError::Transport(e.to_string()),
        MetoceanError::Upstream(msg) => ApplicationError::Transport(msg),
        MetoceanError::MalformedPayload(msg) => ApplicationError::MalformedPayload(msg),
        MetoceanError::Configuration(msg) => ApplicationError::Configuration(msg),
    }
}
