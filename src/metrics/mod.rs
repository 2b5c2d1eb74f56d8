//! Raw text signals consumed by the score aggregator.
//!
//! Each function returns an un-normalized scalar; [`crate::scoring`] maps them onto
//! `[0, 1]`.

pub mod readability;
pub mod sentiment;
pub mod similarity;
pub mod text;


pub use readability::flesch_reading_ease;
pub use sentiment::sentiment_polarity;
pub use similarity::{TfidfModel, cosine_similarity, rouge_recall, tfidf_density};

use crate::scoring::RawMetrics;

/// Words whose presence is counted as loaded language.
pub const BIAS_WORDS: [&str; 5] = ["liberal", "conservative", "fake", "bias", "propaganda"];

/// Fraction of tokens that are in [`BIAS_WORDS`]; `0.0` for text without tokens.
pub fn bias_ratio(text: &str) -> f64 {
    let tokens = text::tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }

    let flagged = tokens
        .iter()
        .filter(|t| BIAS_WORDS.contains(&t.as_str()))
        .count();
    flagged as f64 / tokens.len() as f64
}

/// Computes every text signal for an article.
///
/// ROUGE and cosine similarity are only measured against a non-blank reference
/// summary; otherwise they are reported as absent.
pub fn compute_signals(text: &str, reference: Option<&str>, source_reliability: f64) -> RawMetrics {
    let reference = reference.map(str::trim).filter(|r| !r.is_empty());

    RawMetrics {
        source_reliability,
        sentiment: sentiment_polarity(text),
        readability: flesch_reading_ease(text),
        rouge: reference.map(|r| rouge_recall(text, r)),
        cosine_similarity: reference.map(|r| cosine_similarity(text, r)),
        tfidf: tfidf_density(text),
        bias: bias_ratio(text),
    }
}
