//! In-memory providers that record every call.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{LanguageModel, PageFetcher, ProviderError, SearchProvider, SocialStatsProvider};

type Responder = Arc<dyn Fn(&str) -> Result<String, ProviderError> + Send + Sync>;

/// Language model whose replies are computed from the prompt by a closure.
pub struct MockLanguageModel {
    responder: Responder,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockLanguageModel {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String, ProviderError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `reply`.
    pub fn fixed(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self::new(move |_| Ok(reply.clone()))
    }

    /// Fails every call with [`ProviderError::ModelUnavailable`].
    pub fn failing() -> Self {
        Self::new(|_| Err(ProviderError::model("quota exhausted")))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl std::fmt::Debug for MockLanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLanguageModel")
            .field("calls", &self.calls())
            .finish()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());
        (self.responder)(prompt)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// Search provider returning a fixed list of URLs.
#[derive(Debug, Default)]
pub struct MockSearchProvider {
    results: Vec<String>,
    fail: bool,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results<I, S>(results: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            results: results.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(query.to_string());

        if self.fail {
            return Err(ProviderError::search("mock search failure"));
        }

        Ok(self.results.iter().take(max_results).cloned().collect())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Page fetcher serving canned HTML; unknown URLs fail.
#[derive(Debug, Default)]
pub struct MockPageFetcher {
    pages: Mutex<HashMap<String, String>>,
    calls: AtomicUsize,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(url, html);
        self
    }

    pub fn insert(&self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.lock().insert(url.into(), html.into());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .lock()
            .get(url)
            .cloned()
            .ok_or_else(|| ProviderError::fetch(url, "HTTP 404 Not Found"))
    }
}

/// Social stats source with a fixed mention count, or failing every call.
#[derive(Debug, Default)]
pub struct MockSocialStats {
    mentions: Option<u64>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl MockSocialStats {
    pub fn with_mentions(mentions: u64) -> Self {
        Self {
            mentions: Some(mentions),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[async_trait]
impl SocialStatsProvider for MockSocialStats {
    async fn mentions(&self, url: &str) -> Result<u64, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().push(url.to_string());
        self.mentions
            .ok_or_else(|| ProviderError::stats("mock listing unavailable"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
