//! Periodic conditions polling
//!
//! One fetch cycle per tick. A tick that fires while the previous cycle is
//! still running is skipped. Results are published on a `watch` channel;
//! once the handle is shut down (or dropped) late results are discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use domain::{DateRange, LocationId};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::conditions_service::{ConditionsService, ConditionsSnapshot};

/// What a conditions view should render
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// First cycle still running
    Loading,
    /// Latest successful snapshot
    Ready(Box<ConditionsSnapshot>),
    /// Latest cycle failed
    Failed(String),
}

impl PollState {
    /// The snapshot, if the latest cycle succeeded
    pub fn snapshot(&self) -> Option<&ConditionsSnapshot> {
        match self {
            Self::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Shortest accepted poll interval
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Spawns the poll loop
#[derive(Debug)]
pub struct ConditionsPoller;

impl ConditionsPoller {
    /// Start polling `location_id` every `interval`
    ///
    /// The first cycle starts immediately. `interval` is raised to
    /// [`MIN_POLL_INTERVAL`]. Must be called from within a Tokio runtime.
    pub fn spawn(
        service: Arc<ConditionsService>,
        location_id: LocationId,
        range: DateRange,
        interval: Duration,
    ) -> PollerHandle {
        let interval = interval.max(MIN_POLL_INTERVAL);
        let (tx, rx) = watch::channel(PollState::Loading);
        let tx = Arc::new(tx);
        let mounted = Arc::new(AtomicBool::new(true));
        let in_flight = Arc::new(AtomicBool::new(false));

        info!(
            location_id = %location_id,
            interval_secs = interval.as_secs(),
            "Starting conditions poller"
        );

        let ticker = {
            let mounted = Arc::clone(&mounted);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

                loop {
                    ticker.tick().await;
                    if !mounted.load(Ordering::Acquire) {
                        break;
                    }
                    if in_flight
                        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                        .is_err()
                    {
                        debug!(location_id = %location_id, "Previous cycle still running, skipping tick");
                        continue;
                    }

                    tokio::spawn(run_cycle(
                        Arc::clone(&service),
                        location_id,
                        range,
                        Arc::clone(&tx),
                        Arc::clone(&mounted),
                        Arc::clone(&in_flight),
                    ));
                }
            })
        };

        PollerHandle {
            state: rx,
            mounted,
            ticker,
        }
    }
}

async fn run_cycle(
    service: Arc<ConditionsService>,
    location_id: LocationId,
    range: DateRange,
    tx: Arc<watch::Sender<PollState>>,
    mounted: Arc<AtomicBool>,
    in_flight: Arc<AtomicBool>,
) {
    let result = service.snapshot(location_id, &range).await;

    if mounted.load(Ordering::Acquire) {
        let state = match result {
            Ok(snapshot) => PollState::Ready(Box::new(snapshot)),
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Conditions cycle failed");
                PollState::Failed(e.to_string())
            },
        };
        tx.send_replace(state);
    } else {
        debug!(location_id = %location_id, "Poller shut down, discarding cycle result");
    }

    in_flight.store(false, Ordering::Release);
}

/// Handle to a running poller
///
/// Dropping the handle shuts the poller down.
#[derive(Debug)]
pub struct PollerHandle {
    state: watch::Receiver<PollState>,
    mounted: Arc<AtomicBool>,
    ticker: JoinHandle<()>,
}

impl PollerHandle {
    /// Latest published state
    pub fn state(&self) -> PollState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every published state
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.clone()
    }

    /// Whether the poller has not been shut down
    pub fn is_running(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Stop ticking and discard any cycle still in flight
    pub fn shutdown(&self) {
        if self.mounted.swap(false, Ordering::AcqRel) {
            self.ticker.abort();
            info!("Conditions poller stopped");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
