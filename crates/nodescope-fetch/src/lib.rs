pub mod error;
pub mod fetcher;
pub mod poller;
pub mod resolver;
pub mod source;

pub use error::FetchError;
pub use fetcher::NodeFetcher;
pub use poller::{PollHandle, Poller};
pub use resolver::{resolve_candidates, Candidate, Tier, METRICS_NODES_PATH, NODES_PATH};
pub use source::{HttpNodeSource, NodeSource};

use nodescope_core::MonitorConfig;

/// Fetcher over real HTTP, wired from `config`.
pub fn http_fetcher(config: &MonitorConfig) -> Result<NodeFetcher<HttpNodeSource>, FetchError> {
    let source = HttpNodeSource::with_timeout(config.request_timeout())?;
    Ok(NodeFetcher::new(source, config))
}

/// HTTP poller using the configured interval.
pub fn http_poller(config: &MonitorConfig) -> Result<Poller<HttpNodeSource>, FetchError> {
    Ok(Poller::new(http_fetcher(config)?, config.poll_interval()))
}
