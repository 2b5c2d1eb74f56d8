//! Composite credibility score.
//!
//! Raw signals are mapped onto a `[0, 1]` "goodness" scale by [`normalize`], then
//! combined by [`aggregate`] with fixed weights:
//!
//! | metric             | weight |
//! |--------------------|--------|
//! | source reliability | 0.30   |
//! | sentiment          | 0.10   |
//! | readability        | 0.10   |
//! | ROUGE              | 0.10   |
//! | cosine similarity  | 0.10   |
//! | TF-IDF             | 0.15   |
//! | bias               | 0.15   |
//!
//! # Zero Exclusion
//!
//! A metric whose normalized value is exactly `0.0` is dropped together with its
//! weight, and the mean is renormalized over what is left. Metrics that were never
//! measured (ROUGE and cosine similarity without a reference summary) are carried
//! as absent and dropped the same way, so a legitimately low but non-zero score
//! still counts while a missing one does not drag the mean down.
//!
//! A present metric that genuinely scores `0.0` is indistinguishable from a missing
//! one under this rule. Callers that know a signal is absent should use
//! [`MetricSet::insert_absent`] rather than relying on the zero.

pub mod aggregator;
pub mod normalize;
pub mod types;


pub use aggregator::{aggregate, overall_score};
pub use normalize::{normalize_bias, normalize_readability, normalize_sentiment, normalize_unit};
pub use types::{Metric, MetricKind, MetricSet, RawMetrics};
