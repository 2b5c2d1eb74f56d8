use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{ProviderError, SocialStatsProvider};
use crate::constants::FETCH_USER_AGENT;

pub const REDDIT_INFO_URL: &str = "https://www.reddit.com/api/info.json";

/// Counts Reddit submissions linking to a URL via the public `api/info.json` listing.
#[derive(Debug, Clone)]
pub struct RedditMentionsClient {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<serde::de::IgnoredAny>,
}

impl RedditMentionsClient {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(FETCH_USER_AGENT)
            .build()
            .map_err(|e| ProviderError::stats(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: REDDIT_INFO_URL.to_string(),
            client,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SocialStatsProvider for RedditMentionsClient {
    #[instrument(skip(self))]
    async fn mentions(&self, url: &str) -> Result<u64, ProviderError> {
        let listing: Listing = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| ProviderError::stats(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ProviderError::stats(format!("listing returned an error: {e}")))?
            .json()
            .await
            .map_err(|e| ProviderError::stats(format!("failed to parse listing: {e}")))?;

        let count = listing.data.children.len() as u64;
        debug!(count, "Reddit mentions");
        Ok(count)
    }

    fn name(&self) -> &str {
        "reddit"
    }
}
