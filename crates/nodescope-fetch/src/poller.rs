use crate::{NodeFetcher, NodeSource};
use nodescope_core::config::DEFAULT_POLL_INTERVAL_MS;
use nodescope_core::FetchOutcome;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Runs a [`NodeFetcher`] pass right away and then once per interval.
///
/// Each tick spawns its own pass, so a hung request never delays the next
/// tick. Passes may overlap; whichever finishes last is what subscribers see.
pub struct Poller<S> {
    fetcher: Arc<NodeFetcher<S>>,
    interval: Duration,
}

impl<S: NodeSource + 'static> Poller<S> {
    /// A zero `interval` falls back to the default period.
    pub fn new(fetcher: NodeFetcher<S>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
        } else {
            interval
        };

        Self {
            fetcher: Arc::new(fetcher),
            interval,
        }
    }

    /// Start polling on the current tokio runtime.
    #[instrument(skip(self), fields(interval_ms = self.interval.as_millis()))]
    pub fn start(self) -> PollHandle {
        info!("Starting node poller");
        let (tx, rx) = watch::channel(FetchOutcome::default());
        let token = CancellationToken::new();

        let task = tokio::spawn(run(self.fetcher, self.interval, Arc::new(tx), token.clone()));

        PollHandle {
            token,
            updates: rx,
            task: Some(task),
        }
    }
}

async fn run<S: NodeSource + 'static>(
    fetcher: Arc<NodeFetcher<S>>,
    interval: Duration,
    tx: Arc<watch::Sender<FetchOutcome>>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                tick += 1;
                debug!(tick, "Node poll tick");

                tokio::spawn(run_pass(
                    Arc::clone(&fetcher),
                    Arc::clone(&tx),
                    token.clone(),
                    tick,
                ));
            }
        }
    }

    info!(ticks = tick, "Node poller stopped");
}

/// One spawned pass. Nothing is requested once the poller is stopped, and a
/// result that lands after stopping is never published.
async fn run_pass<S: NodeSource + 'static>(
    fetcher: Arc<NodeFetcher<S>>,
    tx: Arc<watch::Sender<FetchOutcome>>,
    token: CancellationToken,
    tick: u64,
) {
    if token.is_cancelled() {
        debug!(tick, "Poller stopped before pass started");
        return;
    }

    let outcome = fetcher.poll_once().await;
    if token.is_cancelled() {
        debug!(tick, "Poller stopped, dropping late result");
        return;
    }
    tx.send_replace(outcome);
}

/// Owner of a running [`Poller`]. Stopping (or dropping) it cancels the schedule.
pub struct PollHandle {
    token: CancellationToken,
    updates: watch::Receiver<FetchOutcome>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// New receiver that wakes on every published outcome.
    pub fn subscribe(&self) -> watch::Receiver<FetchOutcome> {
        self.updates.clone()
    }

    pub fn latest(&self) -> FetchOutcome {
        self.updates.borrow().clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel the schedule. Calling it again is a no-op.
    pub fn stop(&mut self) {
        self.token.cancel();
    }

    /// Cancel and wait for the scheduling loop to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
