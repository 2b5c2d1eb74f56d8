//! Claim verification: cache check, rate limiting, evidence retrieval and an
//! evidence-grounded verdict from the language model.
//!
//! Claims are processed strictly in order, one at a time. Per claim:
//!
//! 1. **Cache hit**: the stored verdict is returned; no token is taken and no
//!    provider is called.
//! 2. **Miss**: wait for a rate-limit token, gather evidence, prompt the model.
//! 3. **Model success**: the reply is cached and returned verbatim.
//! 4. **Model failure**: [`MODEL_FAILURE_VERDICT`] is returned and nothing is
//!    cached, so the next run retries the call.


use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, info, instrument, warn};

use crate::cache::VerificationCacheHandle;
use crate::claims::Claim;
use crate::constants::MODEL_FAILURE_VERDICT;
use crate::evidence::EvidenceRetriever;
use crate::hashing::claim_fingerprint;
use crate::providers::LanguageModel;
use crate::ratelimit::TokenBucket;

/// Prompt asking the model for a one-line misinformation score.
pub fn verification_prompt(claim: &Claim, evidence: &str) -> String {
    format!(
        "Claim: {claim}\n\n\
         Evidence: {evidence}\n\n\
         Based on the evidence, provide a misinformation score between 0-100.\n\
         - 0 = Completely Reliable\n\
         - 100 = Highly Misinformed\n\
         - Consider factors like credibility, source verification, and contradictions.\n\n\
         Only return:\n\
         \"Misinformation Score: X/100 - [Short reason]\""
    )
}

/// Where a verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictSource {
    Cache,
    Model,
    /// The model call failed and the fallback sentinel was used.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimVerdict {
    pub claim: Claim,
    pub verdict: String,
    pub source: VerdictSource,
}

/// Verdicts in claim order, one entry per distinct claim.
///
/// Serializes as a JSON object `claim → verdict` with keys in claim order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    entries: Vec<ClaimVerdict>,
}

impl VerificationReport {
    fn contains(&self, claim: &Claim) -> bool {
        self.entries.iter().any(|e| &e.claim == claim)
    }

    fn push(&mut self, entry: ClaimVerdict) {
        self.entries.push(entry);
    }

    pub fn get(&self, claim: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.claim.as_str() == claim)
            .map(|e| e.verdict.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClaimVerdict> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, source: VerdictSource) -> usize {
        self.entries.iter().filter(|e| e.source == source).count()
    }
}

impl Serialize for VerificationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.claim.as_str(), &entry.verdict)?;
        }
        map.end()
    }
}

pub struct ClaimVerifier {
    cache: VerificationCacheHandle,
    retriever: EvidenceRetriever,
    model: Arc<dyn LanguageModel>,
    limiter: Arc<TokenBucket>,
}

impl std::fmt::Debug for ClaimVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimVerifier")
            .field("cache", &self.cache)
            .field("retriever", &self.retriever)
            .field("model", &self.model.model_name())
            .field("limiter", &self.limiter)
            .finish()
    }
}

impl ClaimVerifier {
    pub fn new(
        cache: VerificationCacheHandle,
        retriever: EvidenceRetriever,
        model: Arc<dyn LanguageModel>,
        limiter: Arc<TokenBucket>,
    ) -> Self {
        Self {
            cache,
            retriever,
            model,
            limiter,
        }
    }

    pub fn cache(&self) -> &VerificationCacheHandle {
        &self.cache
    }

    /// Verifies `claims` in order. Later exact duplicates are skipped.
    #[instrument(skip_all, fields(claims = claims.len()))]
    pub async fn verify(&self, claims: &[Claim]) -> VerificationReport {
        let mut report = VerificationReport::default();

        for claim in claims {
            if report.contains(claim) {
                debug!(claim_hash = %claim_fingerprint(claim.as_str()), "Skipping duplicate claim");
                continue;
            }
            report.push(self.verify_claim(claim).await);
        }

        info!(
            verified = report.len(),
            cached = report.count(VerdictSource::Cache),
            failed = report.count(VerdictSource::Fallback),
            "Verification complete"
        );
        report
    }

    #[instrument(skip_all, fields(claim_hash = %claim_fingerprint(claim.as_str())))]
    pub async fn verify_claim(&self, claim: &Claim) -> ClaimVerdict {
        if let Some(verdict) = self.cache.lookup(claim) {
            debug!("Verdict cache hit");
            return ClaimVerdict {
                claim: claim.clone(),
                verdict,
                source: VerdictSource::Cache,
            };
        }

        self.limiter.acquire().await;

        let evidence = self.retriever.retrieve(claim).await;
        let prompt = verification_prompt(claim, &evidence.joined());

        match self.model.complete(&prompt).await {
            Ok(verdict) => {
                self.cache.store(claim, verdict.clone());
                ClaimVerdict {
                    claim: claim.clone(),
                    verdict,
                    source: VerdictSource::Model,
                }
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Verdict unavailable; returning fallback");
                ClaimVerdict {
                    claim: claim.clone(),
                    verdict: MODEL_FAILURE_VERDICT.to_string(),
                    source: VerdictSource::Fallback,
                }
            }
        }
    }
}
