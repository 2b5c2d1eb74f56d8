use tracing::debug;

use super::types::{MetricSet, RawMetrics};

/// Renormalized weighted mean over the metrics that survive exclusion.
///
/// A metric is excluded (value *and* weight) when it is absent or normalized to
/// exactly `0.0`. If nothing survives the score is `0.0`.
pub fn aggregate(metrics: &MetricSet) -> f64 {
    let (weighted_sum, total_weight, surviving) = metrics
        .iter()
        .filter_map(|m| m.contributing_value().map(|v| (v, m.weight())))
        .fold((0.0_f64, 0.0_f64, 0_usize), |(sum, weight, n), (v, w)| {
            (sum + v * w, weight + w, n + 1)
        });

    if surviving == 0 || total_weight <= 0.0 {
        debug!(
            metrics = metrics.len(),
            "All metrics excluded, overall score is 0"
        );
        return 0.0;
    }

    let score = weighted_sum / total_weight;

    debug!(
        metrics = metrics.len(),
        surviving = surviving,
        total_weight = total_weight,
        score = score,
        "Aggregated metric set"
    );

    score.clamp(0.0, 1.0)
}

/// Normalizes raw signals and aggregates them.
pub fn overall_score(raw: &RawMetrics) -> f64 {
    aggregate(&raw.normalized())
}
