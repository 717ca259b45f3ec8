pub mod coerce;
pub mod config;
pub mod error;
pub mod node;
pub mod normalize;
pub mod view;

pub use coerce::coerce_finite_number;
pub use config::MonitorConfig;
pub use error::{NodeScopeError, Result};
pub use node::{FetchOutcome, NormalizedNode, RawNodeRecord};
pub use normalize::{normalize_nodes, normalize_payload, ResponseShape};
