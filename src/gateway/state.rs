use std::sync::Arc;

use crate::article::ArticleReader;
use crate::cache::VerificationCacheHandle;
use crate::claims::{ClaimExtractor, LlmClaimExtractor};
use crate::evidence::EvidenceRetriever;
use crate::providers::{LanguageModel, PageFetcher, SearchProvider, SocialStatsProvider};
use crate::ratelimit::TokenBucket;
use crate::sources::ReliabilityDataset;
use crate::verifier::ClaimVerifier;

#[derive(Clone)]
pub struct HandlerState {
    pub reader: ArticleReader,

    pub dataset: Arc<ReliabilityDataset>,

    pub extractor: Arc<dyn ClaimExtractor>,

    pub verifier: Arc<ClaimVerifier>,

    /// Mention counts reported by `/check_news`.
    pub social: Arc<dyn SocialStatsProvider>,

    pub search_available: bool,

    pub model_name: String,

    /// Allowed CORS origins; `*` allows any.
    pub cors_origins: Vec<String>,
}

impl HandlerState {
    /// Wires the pipeline: one claim extractor shared by article and evidence
    /// extraction, and a fresh verification cache.
    pub fn new(
        dataset: ReliabilityDataset,
        fetcher: Arc<dyn PageFetcher>,
        search: Arc<dyn SearchProvider>,
        model: Arc<dyn LanguageModel>,
        social: Arc<dyn SocialStatsProvider>,
        limiter: TokenBucket,
    ) -> Self {
        let reader = ArticleReader::new(fetcher);
        let extractor: Arc<dyn ClaimExtractor> = Arc::new(LlmClaimExtractor::new(model.clone()));
        let search_available = search.is_available();
        let retriever = EvidenceRetriever::new(search, reader.clone(), extractor.clone());
        let model_name = model.model_name().to_string();
        let verifier = ClaimVerifier::new(
            VerificationCacheHandle::new(),
            retriever,
            model,
            Arc::new(limiter),
        );

        Self {
            reader,
            dataset: Arc::new(dataset),
            extractor,
            verifier: Arc::new(verifier),
            social,
            search_available,
            model_name,
            cors_origins: vec!["*".to_string()],
        }
    }

    pub fn with_cors_origins(mut self, cors_origins: Vec<String>) -> Self {
        self.cors_origins = cors_origins;
        self
    }
}

impl std::fmt::Debug for HandlerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerState")
            .field("dataset_entries", &self.dataset.len())
            .field("verifier", &self.verifier)
            .field("social", &self.social.name())
            .field("search_available", &self.search_available)
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}
