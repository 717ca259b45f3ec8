use nodescope_core::MonitorConfig;
use serde::Serialize;
use std::fmt;

pub const METRICS_NODES_PATH: &str = "/api/v1/metrics/nodes";
pub const NODES_PATH: &str = "/api/v1/nodes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Served next to the dashboard itself.
    SameOrigin,
    /// The explicitly configured settings service.
    Configured,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::SameOrigin => write!(f, "same-origin"),
            Tier::Configured => write!(f, "configured"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub tier: Tier,
    pub url: String,
}

/// Endpoints to try for one tick, in order.
pub fn resolve_candidates(config: &MonitorConfig) -> Vec<Candidate> {
    let origin = config.origin_base();

    let mut candidates: Vec<Candidate> = [METRICS_NODES_PATH, NODES_PATH]
        .into_iter()
        .map(|path| Candidate {
            tier: Tier::SameOrigin,
            url: format!("{}{}", origin, path),
        })
        .collect();

    if let Some(base) = config.service_base() {
        candidates.push(Candidate {
            tier: Tier::Configured,
            url: format!("{}{}", base, NODES_PATH),
        });
    }

    candidates
}
