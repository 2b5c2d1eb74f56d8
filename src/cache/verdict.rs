//! Claim → verdict cache (in-memory, process lifetime).
//!
//! Keys are the BLAKE3 hash of the claim text; the stored entry keeps the full
//! claim so a lookup only hits on an exact textual match.

use std::sync::Arc;

use moka::sync::Cache;

use crate::claims::Claim;
use crate::hashing::hash_claim;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedVerdict {
    claim: String,
    verdict: String,
}

/// Exact-match verdict cache. Unbounded, never evicted, never persisted.
pub struct VerificationCache {
    entries: Cache<[u8; 32], Arc<CachedVerdict>>,
}

impl VerificationCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
        }
    }

    /// Returns the stored verdict for exactly this claim text.
    pub fn lookup(&self, claim: &Claim) -> Option<String> {
        self.entries
            .get(&hash_claim(claim.as_str()))
            .filter(|entry| entry.claim == claim.as_str())
            .map(|entry| entry.verdict.clone())
    }

    /// Stores a verdict and returns the key it was filed under.
    pub fn store(&self, claim: &Claim, verdict: impl Into<String>) -> [u8; 32] {
        let hash = hash_claim(claim.as_str());
        self.entries.insert(
            hash,
            Arc::new(CachedVerdict {
                claim: claim.as_str().to_string(),
                verdict: verdict.into(),
            }),
        );
        hash
    }

    pub fn contains(&self, claim: &Claim) -> bool {
        self.lookup(claim).is_some()
    }

    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }
}

impl Default for VerificationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VerificationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[derive(Clone, Default)]
/// Shared handle to a [`VerificationCache`].
pub struct VerificationCacheHandle {
    inner: Arc<VerificationCache>,
}

impl VerificationCacheHandle {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn lookup(&self, claim: &Claim) -> Option<String> {
        self.inner.lookup(claim)
    }

    #[inline]
    pub fn store(&self, claim: &Claim, verdict: impl Into<String>) -> [u8; 32] {
        self.inner.store(claim, verdict)
    }

    #[inline]
    pub fn contains(&self, claim: &Claim) -> bool {
        self.inner.contains(claim)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Returns the number of strong references to the underlying cache.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl std::fmt::Debug for VerificationCacheHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationCacheHandle")
            .field("entries", &self.len())
            .field("strong_count", &self.strong_count())
            .finish()
    }
}
