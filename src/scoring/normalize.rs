//! Raw signal → `[0, 1]` "higher is better" mappings.
//!
//! Normalization is total: out-of-range inputs are clamped, never rejected.

use super::types::{MetricKind, MetricSet, RawMetrics, sanitize_unit};

/// Neutral text scores highest; strong polarity in either direction is penalized equally.
#[inline]
pub fn normalize_sentiment(sentiment: f64) -> f64 {
    sanitize_unit(1.0 - sentiment.abs())
}

/// Reading ease is scaled by 100 and clamped.
#[inline]
pub fn normalize_readability(readability: f64) -> f64 {
    sanitize_unit(readability / 100.0)
}

/// A ratio above 1 is malformed and maps to 0.
#[inline]
pub fn normalize_bias(bias: f64) -> f64 {
    if bias <= 1.0 {
        sanitize_unit(1.0 - bias)
    } else {
        0.0
    }
}

/// Source reliability, ROUGE, cosine and TF-IDF are already unit-scaled.
#[inline]
pub fn normalize_unit(value: f64) -> f64 {
    sanitize_unit(value)
}

impl RawMetrics {
    /// Normalizes every signal into a [`MetricSet`] in canonical order.
    pub fn normalized(&self) -> MetricSet {
        let mut set = MetricSet::new();
        set.insert(
            MetricKind::SourceReliability,
            normalize_unit(self.source_reliability),
        );
        set.insert(MetricKind::Sentiment, normalize_sentiment(self.sentiment));
        set.insert(
            MetricKind::Readability,
            normalize_readability(self.readability),
        );
        match self.rouge {
            Some(rouge) => set.insert(MetricKind::Rouge, normalize_unit(rouge)),
            None => set.insert_absent(MetricKind::Rouge),
        };
        match self.cosine_similarity {
            Some(cosine) => set.insert(MetricKind::CosineSimilarity, normalize_unit(cosine)),
            None => set.insert_absent(MetricKind::CosineSimilarity),
        };
        set.insert(MetricKind::Tfidf, normalize_unit(self.tfidf));
        set.insert(MetricKind::Bias, normalize_bias(self.bias));
        set
    }
}
