//! Application services - Use case implementations

mod conditions_service;
mod poller;

pub use conditions_service::{ConditionsService, ConditionsSnapshot};
pub use poller::{ConditionsPoller, MIN_POLL_INTERVAL, PollState, PollerHandle};
