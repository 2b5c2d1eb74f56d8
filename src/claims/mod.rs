//! Claim extraction: turning article text into short, checkable statements.
//!
//! The extractor is a trait so the verifier and evidence retriever can be driven
//! by a canned extractor in tests. [`LlmClaimExtractor`] is the production
//! implementation and asks the language model for one claim per line.


use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::article::truncate_chars;
use crate::constants::CLAIM_TEXT_CHAR_LIMIT;
use crate::providers::LanguageModel;

/// A single factual statement, trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    /// Returns `None` for blank input.
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Claim {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Produces an ordered list of claims from free text.
///
/// Implementations never fail: anything that goes wrong yields an empty list.
#[async_trait]
pub trait ClaimExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Vec<Claim>;
}

/// Prompt sent to the model for a (truncated) block of article text.
pub fn extraction_prompt(text: &str) -> String {
    format!("Extract the key factual claims from the following news article:\n\n{text}")
}

/// Splits a model reply into claims, one per non-blank line, preserving order.
pub fn parse_claims(reply: &str) -> Vec<Claim> {
    reply.lines().filter_map(Claim::new).collect()
}

/// [`ClaimExtractor`] backed by a [`LanguageModel`].
#[derive(Clone)]
pub struct LlmClaimExtractor {
    model: Arc<dyn LanguageModel>,
    char_limit: usize,
}

impl fmt::Debug for LlmClaimExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmClaimExtractor")
            .field("model", &self.model.model_name())
            .field("char_limit", &self.char_limit)
            .finish()
    }
}

impl LlmClaimExtractor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            char_limit: CLAIM_TEXT_CHAR_LIMIT,
        }
    }

    pub fn with_char_limit(mut self, char_limit: usize) -> Self {
        self.char_limit = char_limit;
        self
    }
}

#[async_trait]
impl ClaimExtractor for LlmClaimExtractor {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn extract(&self, text: &str) -> Vec<Claim> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let prompt = extraction_prompt(truncate_chars(text, self.char_limit));
        match self.model.complete(&prompt).await {
            Ok(reply) => {
                let claims = parse_claims(&reply);
                debug!(claims = claims.len(), "Extracted claims");
                claims
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Claim extraction failed");
                Vec::new()
            }
        }
    }
}

/// Extractor returning the same claims for every input.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, Default)]
pub struct StaticClaimExtractor {
    claims: Vec<Claim>,
}

#[cfg(any(test, feature = "mock"))]
impl StaticClaimExtractor {
    pub fn new<I, S>(claims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            claims: claims.into_iter().filter_map(Claim::new).collect(),
        }
    }
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl ClaimExtractor for StaticClaimExtractor {
    async fn extract(&self, text: &str) -> Vec<Claim> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        self.claims.clone()
    }
}
