use thiserror::Error;

/// Why a single candidate endpoint could not produce a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Invalid JSON body: {0}")]
    Parse(String),

    #[error("No endpoint configured")]
    NoCandidates,
}
