use crate::{NodeScopeError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

pub const ORIGIN_ENV: &str = "NODESCOPE_ORIGIN";
pub const SERVICE_URL_ENV: &str = "SETTING_SERVICE_API_URL";
pub const POLL_INTERVAL_ENV: &str = "SETTING_SERVICE_TIMEOUT";
pub const REQUEST_TIMEOUT_ENV: &str = "NODESCOPE_REQUEST_TIMEOUT_MS";

/// Settings for one telemetry pipeline, read once when the pipeline is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Base URL the dashboard is served from; same-origin paths hang off it.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Absolute settings-service base URL. `None` or blank disables the fallback tier.
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Per-request timeout. Unset means the transport decides.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            service_url: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_ms: None,
        }
    }
}

impl MonitorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(origin) = get(ORIGIN_ENV) {
            config.origin = origin;
        }
        config.service_url = get(SERVICE_URL_ENV);
        if let Some(raw) = get(POLL_INTERVAL_ENV) {
            config.poll_interval_ms = parse_millis(POLL_INTERVAL_ENV, &raw)?;
        }
        if let Some(raw) = get(REQUEST_TIMEOUT_ENV) {
            config.request_timeout_ms = Some(parse_millis(REQUEST_TIMEOUT_ENV, &raw)?);
        }

        Ok(config)
    }

    /// Same-origin base with trailing slashes removed.
    pub fn origin_base(&self) -> &str {
        self.origin.trim().trim_end_matches('/')
    }

    /// Configured service base with trailing slashes removed, if any.
    pub fn service_base(&self) -> Option<&str> {
        self.service_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }

    /// Polling period. Zero falls back to the default.
    pub fn poll_interval(&self) -> Duration {
        match self.poll_interval_ms {
            0 => Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            ms => Duration::from_millis(ms),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|e| NodeScopeError::Config(format!("{} must be milliseconds, got {:?}: {}", key, raw, e)))
}
