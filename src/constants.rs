//! Cross-cutting, shared constants.
//!
//! Pipeline limits and the literal strings that form part of the response contract
//! live here so the gateway, verifier and tests agree on them.

/// Characters of page text handed to the claim extractor.
pub const CLAIM_TEXT_CHAR_LIMIT: usize = 3000;

/// Search results requested per claim.
pub const MAX_EVIDENCE_RESULTS: usize = 5;

/// Outlets the evidence search is restricted to (`site:` filters, OR'd).
pub const EVIDENCE_NEWS_SITES: [&str; 11] = [
    "bbc.com",
    "cnn.com",
    "reuters.com",
    "nytimes.com",
    "theguardian.com",
    "apnews.com",
    "npr.org",
    "washingtonpost.com",
    "aljazeera.com",
    "forbes.com",
    "bloomberg.com",
];

/// Evidence block used when no source yielded any text.
pub const NO_EVIDENCE_FALLBACK: &str = "No relevant evidence found.";

/// Verdict reported (and never cached) when the language model call fails.
pub const MODEL_FAILURE_VERDICT: &str = "API Limit Exceeded - Please Try Again Later";

/// Error body of the verify endpoint when extraction produced nothing.
pub const NO_CLAIMS_MESSAGE: &str = "No factual claims extracted from the article.";

/// Title reported by the score endpoint when the article could not be read.
pub const EXTRACTION_ERROR_TITLE: &str = "Extraction Error or Empty Article";

pub const UNRELIABLE_SOURCE_MESSAGE: &str =
    "This website is in the list of known unreliable sources.";
pub const RELIABLE_SOURCE_MESSAGE: &str = "No flagged misinformation detected.";

pub const DEFAULT_LLM_MODEL: &str = "gemini-2.0-flash";

/// Browser-like user agent; several outlets refuse requests without one.
pub const FETCH_USER_AGENT: &str = "Mozilla/5.0 (compatible; credence/0.1)";

pub const CREDENCE_STATUS_HEADER: &str = "X-Credence-Status";
pub const CREDENCE_STATUS_HEALTHY: &str = "healthy";
pub const CREDENCE_STATUS_READY: &str = "ready";
pub const CREDENCE_STATUS_NOT_READY: &str = "not_ready";
