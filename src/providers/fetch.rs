use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{PageFetcher, ProviderError};
use crate::constants::FETCH_USER_AGENT;

/// `reqwest`-backed page fetcher with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(FETCH_USER_AGENT)
            .build()
            .map_err(|e| ProviderError::fetch("-", format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, ProviderError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::fetch(url, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::fetch(url, format!("HTTP {status}")));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ProviderError::fetch(url, format!("failed to read body: {e}")))?;

        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
