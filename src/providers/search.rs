use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{ProviderError, SearchProvider};

pub const GOOGLE_CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search JSON API client.
///
/// Without both an API key and an engine id every search fails with
/// [`ProviderError::SearchFailed`].
#[derive(Debug, Clone)]
pub struct GoogleSearchClient {
    api_key: Option<String>,
    engine_id: Option<String>,
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<CustomSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CustomSearchItem {
    #[serde(default)]
    link: String,
}

impl GoogleSearchClient {
    pub fn new(
        api_key: Option<String>,
        engine_id: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::search(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            engine_id,
            endpoint: GOOGLE_CUSTOM_SEARCH_URL.to_string(),
            client,
        })
    }

    /// Points the client at a different Custom Search compatible endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.engine_id.is_some()
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchClient {
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, ProviderError> {
        let (Some(api_key), Some(engine_id)) = (&self.api_key, &self.engine_id) else {
            return Err(ProviderError::search("search credentials are not configured"));
        };

        let num = max_results.to_string();
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("key", api_key.as_str()),
                ("cx", engine_id.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::search(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ProviderError::search(format!("search API returned an error: {e}")))?;

        let data: CustomSearchResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::search(format!("failed to parse response: {e}")))?;

        let links: Vec<String> = data
            .items
            .into_iter()
            .map(|item| item.link)
            .filter(|link| !link.is_empty())
            .take(max_results)
            .collect();

        debug!(links = ?links, "Search results");
        info!(count = links.len(), "Search complete");
        Ok(links)
    }

    fn name(&self) -> &str {
        "google-custom-search"
    }

    fn is_available(&self) -> bool {
        self.is_configured()
    }
}
