use crate::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Something that can GET a URL and hand back its JSON body.
#[async_trait]
pub trait NodeSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpNodeSource {
    client: reqwest::Client,
}

impl HttpNodeSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let Some(timeout) = timeout else {
            return Ok(Self::new());
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Default for HttpNodeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeSource for HttpNodeSource {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            FetchError::Parse(format!("{} - Body: {}", e, truncate(&body, 200)))
        })
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
