//! Credence library crate (used by the server binary and integration tests).
//!
//! Estimates how trustworthy a news article is from two pipelines:
//!
//! - **Scoring**: text signals ([`metrics`]) plus a source reliability lookup
//!   ([`sources`]) are normalized and combined into one bounded score ([`scoring`]).
//! - **Claim verification**: claims are extracted by a language model
//!   ([`claims`]), evidence is gathered from a restricted web search
//!   ([`evidence`]) and each claim receives an evidence-grounded verdict
//!   ([`verifier`]), with a process-wide [`cache`] and a shared [`ratelimit`]
//!   limiter in front of the providers.
//!
//! External services sit behind the traits in [`providers`]. Mock
//! implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod article;
pub mod cache;
pub mod claims;
pub mod config;
pub mod constants;
pub mod evidence;
pub mod gateway;
pub mod hashing;
pub mod metrics;
pub mod providers;
pub mod ratelimit;
pub mod scoring;
pub mod sources;
pub mod verifier;

pub use article::{Article, ArticleReader, extract_paragraph_text, extract_title, truncate_chars};
pub use cache::{VerificationCache, VerificationCacheHandle};
#[cfg(any(test, feature = "mock"))]
pub use claims::StaticClaimExtractor;
pub use claims::{Claim, ClaimExtractor, LlmClaimExtractor, parse_claims};
pub use config::{Config, ConfigError};
pub use evidence::{EvidenceBundle, EvidenceRetriever, build_search_query};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
pub use hashing::{claim_fingerprint, hash_claim};
pub use metrics::compute_signals;
#[cfg(any(test, feature = "mock"))]
pub use providers::{MockLanguageModel, MockPageFetcher, MockSearchProvider, MockSocialStats};
pub use providers::{
    GenaiModel, GoogleSearchClient, HttpPageFetcher, LanguageModel, PageFetcher, ProviderError,
    RedditMentionsClient, SearchProvider, SocialStatsProvider,
};
pub use ratelimit::TokenBucket;
pub use scoring::{Metric, MetricKind, MetricSet, RawMetrics, aggregate, overall_score};
pub use sources::{DatasetError, DomainRecord, ReliabilityDataset, extract_domain};
pub use verifier::{ClaimVerdict, ClaimVerifier, VerdictSource, VerificationReport};
