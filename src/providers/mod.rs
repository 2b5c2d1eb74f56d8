//! External collaborators: web search, page fetch, the language model and
//! social-media mention counts.
//!
//! The pipeline only sees the traits below; concrete adapters are injected at
//! startup (and swapped for mocks in tests).

pub mod error;
pub mod fetch;
pub mod llm;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod search;
pub mod social;


use async_trait::async_trait;

pub use error::ProviderError;
pub use fetch::HttpPageFetcher;
pub use llm::GenaiModel;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockLanguageModel, MockPageFetcher, MockSearchProvider, MockSocialStats};
pub use search::GoogleSearchClient;
pub use social::RedditMentionsClient;

/// Web search returning result URLs, best first.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, ProviderError>;

    fn name(&self) -> &str;

    /// `false` when every search is known to fail (e.g. missing credentials).
    fn is_available(&self) -> bool {
        true
    }
}

/// Retrieves the raw HTML of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ProviderError>;
}

/// Single-prompt text completion.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    fn model_name(&self) -> &str;
}

/// Number of social-media posts linking to a URL.
#[async_trait]
pub trait SocialStatsProvider: Send + Sync {
    async fn mentions(&self, url: &str) -> Result<u64, ProviderError>;

    fn name(&self) -> &str;
}
