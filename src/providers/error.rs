use thiserror::Error;

/// Failure kinds of the external collaborators.
///
/// These are returned, never panicked on; each call site decides whether the
/// failure becomes an empty result or a sentinel verdict.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("language model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    #[error("social stats unavailable: {reason}")]
    StatsUnavailable { reason: String },
}

impl ProviderError {
    pub fn search(reason: impl Into<String>) -> Self {
        ProviderError::SearchFailed {
            reason: reason.into(),
        }
    }

    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ProviderError::FetchFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn model(reason: impl Into<String>) -> Self {
        ProviderError::ModelUnavailable {
            reason: reason.into(),
        }
    }

    pub fn stats(reason: impl Into<String>) -> Self {
        ProviderError::StatsUnavailable {
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::SearchFailed { .. } => "search_failed",
            ProviderError::FetchFailed { .. } => "fetch_failed",
            ProviderError::ModelUnavailable { .. } => "model_unavailable",
            ProviderError::StatsUnavailable { .. } => "stats_unavailable",
        }
    }
}
