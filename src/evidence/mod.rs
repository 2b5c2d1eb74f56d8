//! Evidence retrieval: a site-restricted search per claim, then claim
//! extraction over every page the search returns.


use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::article::ArticleReader;
use crate::claims::{Claim, ClaimExtractor};
use crate::constants::{EVIDENCE_NEWS_SITES, MAX_EVIDENCE_RESULTS, NO_EVIDENCE_FALLBACK};
use crate::hashing::claim_fingerprint;
use crate::providers::SearchProvider;

/// Claim text followed by OR'd `site:` filters for every allowed outlet.
pub fn build_search_query(claim: &Claim) -> String {
    let sites = EVIDENCE_NEWS_SITES
        .iter()
        .map(|site| format!("site:{site}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("{} {sites}", claim.as_str())
}

/// Evidence snippets for one claim, in search-result order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceBundle {
    pub sources: Vec<String>,
    pub snippets: Vec<String>,
    /// Search or page failures that contributed nothing.
    pub failures: usize,
}

impl EvidenceBundle {
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Snippets separated by blank lines, or the fallback text when empty.
    pub fn joined(&self) -> String {
        if self.snippets.is_empty() {
            NO_EVIDENCE_FALLBACK.to_string()
        } else {
            self.snippets.join("\n\n")
        }
    }
}

#[derive(Clone)]
pub struct EvidenceRetriever {
    search: Arc<dyn SearchProvider>,
    reader: ArticleReader,
    extractor: Arc<dyn ClaimExtractor>,
    max_results: usize,
}

impl std::fmt::Debug for EvidenceRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvidenceRetriever")
            .field("search", &self.search.name())
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl EvidenceRetriever {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        reader: ArticleReader,
        extractor: Arc<dyn ClaimExtractor>,
    ) -> Self {
        Self {
            search,
            reader,
            extractor,
            max_results: MAX_EVIDENCE_RESULTS,
        }
    }

    /// Never fails; every failure becomes an empty contribution.
    #[instrument(skip(self, claim), fields(claim_hash = %claim_fingerprint(claim.as_str())))]
    pub async fn retrieve(&self, claim: &Claim) -> EvidenceBundle {
        let mut bundle = EvidenceBundle::default();
        let query = build_search_query(claim);

        let urls = match self.search.search(&query, self.max_results).await {
            Ok(urls) => urls,
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Evidence search failed");
                bundle.failures += 1;
                return bundle;
            }
        };

        for url in urls.into_iter().take(self.max_results) {
            match self.reader.read(&url).await {
                Ok(article) => {
                    let fragments = self.extractor.extract(&article.text).await;
                    bundle
                        .snippets
                        .extend(fragments.into_iter().map(Claim::into_inner));
                }
                Err(e) => {
                    warn!(
                        url = %url,
                        error = %e,
                        kind = e.kind(),
                        "Evidence page unavailable"
                    );
                    bundle.failures += 1;
                }
            }
            bundle.sources.push(url);
        }

        debug!(
            sources = bundle.sources.len(),
            snippets = bundle.snippets.len(),
            failures = bundle.failures,
            "Evidence gathered"
        );
        bundle
    }
}
