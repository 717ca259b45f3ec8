use crate::resolver::{resolve_candidates, Candidate, Tier};
use crate::{FetchError, NodeSource};
use nodescope_core::{normalize_payload, FetchOutcome, MonitorConfig};
use serde_json::Value;
use tracing::{debug, error, instrument};

/// Walks the candidate endpoints and turns the first good payload into a [`FetchOutcome`].
pub struct NodeFetcher<S> {
    source: S,
    candidates: Vec<Candidate>,
}

impl<S: NodeSource> NodeFetcher<S> {
    pub fn new(source: S, config: &MonitorConfig) -> Self {
        Self {
            source,
            candidates: resolve_candidates(config),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Same-origin candidates first, then the configured service. The error
    /// returned on total failure is the last one seen, so a configured-tier
    /// failure wins over same-origin ones.
    pub async fn fetch_payload(&self) -> Result<(&Candidate, Value), FetchError> {
        let mut last_err = None;

        for tier in [Tier::SameOrigin, Tier::Configured] {
            for candidate in self.candidates.iter().filter(|c| c.tier == tier) {
                match self.source.get_json(&candidate.url).await {
                    Ok(payload) => return Ok((candidate, payload)),
                    Err(e) => {
                        debug!(url = %candidate.url, tier = %candidate.tier, "Node endpoint failed: {}", e);
                        last_err = Some(e);
                    }
                }
            }
        }

        Err(last_err.unwrap_or(FetchError::NoCandidates))
    }

    /// One full resolve → fetch → normalize pass. Never fails; errors end up in the outcome.
    #[instrument(skip(self), fields(candidates = self.candidates.len()))]
    pub async fn poll_once(&self) -> FetchOutcome {
        match self.fetch_payload().await {
            Ok((candidate, payload)) => {
                debug!(url = %candidate.url, "Nodes payload received");
                let outcome = normalize_payload(payload);
                if let Some(msg) = &outcome.error {
                    error!(url = %candidate.url, "Nodes payload rejected: {}", msg);
                }
                outcome
            }
            Err(e) => {
                error!("Nodes fetch failed: {}", e);
                FetchOutcome::failed(e.to_string())
            }
        }
    }
}
