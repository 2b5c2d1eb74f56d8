use serde::Serialize;

/// The fixed set of signals that feed the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    SourceReliability,
    Sentiment,
    Readability,
    Rouge,
    CosineSimilarity,
    Tfidf,
    Bias,
}

impl MetricKind {
    /// All kinds, in the canonical reporting order.
    pub const ALL: [MetricKind; 7] = [
        MetricKind::SourceReliability,
        MetricKind::Sentiment,
        MetricKind::Readability,
        MetricKind::Rouge,
        MetricKind::CosineSimilarity,
        MetricKind::Tfidf,
        MetricKind::Bias,
    ];

    /// Compile-time weight; the weights of [`MetricKind::ALL`] sum to 1.0.
    #[inline]
    pub const fn weight(self) -> f64 {
        match self {
            MetricKind::SourceReliability => 0.30,
            MetricKind::Sentiment => 0.10,
            MetricKind::Readability => 0.10,
            MetricKind::Rouge => 0.10,
            MetricKind::CosineSimilarity => 0.10,
            MetricKind::Tfidf => 0.15,
            MetricKind::Bias => 0.15,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            MetricKind::SourceReliability => "source_reliability",
            MetricKind::Sentiment => "sentiment",
            MetricKind::Readability => "readability",
            MetricKind::Rouge => "rouge",
            MetricKind::CosineSimilarity => "cosine_similarity",
            MetricKind::Tfidf => "tfidf",
            MetricKind::Bias => "bias",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One normalized metric. `None` means the signal was not measured at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub kind: MetricKind,
    pub value: Option<f64>,
}

impl Metric {
    #[inline]
    pub fn weight(&self) -> f64 {
        self.kind.weight()
    }

    /// Value that takes part in aggregation, if any.
    ///
    /// Absent metrics and present metrics that normalized to exactly `0.0` are
    /// both excluded.
    #[inline]
    pub fn contributing_value(&self) -> Option<f64> {
        self.value.filter(|v| *v != 0.0)
    }
}

/// Insertion-ordered set of normalized metrics, at most one per [`MetricKind`].
///
/// Every present value lies in `[0, 1]`; [`MetricSet::insert`] clamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet {
    metrics: Vec<Metric>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces, keeping its position) a normalized value.
    pub fn insert(&mut self, kind: MetricKind, value: f64) -> &mut Self {
        self.put(kind, Some(sanitize_unit(value)))
    }

    /// Records that `kind` was not measured for this request.
    pub fn insert_absent(&mut self, kind: MetricKind) -> &mut Self {
        self.put(kind, None)
    }

    pub fn with(mut self, kind: MetricKind, value: f64) -> Self {
        self.insert(kind, value);
        self
    }

    pub fn with_absent(mut self, kind: MetricKind) -> Self {
        self.insert_absent(kind);
        self
    }

    pub fn get(&self, kind: MetricKind) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    fn put(&mut self, kind: MetricKind, value: Option<f64>) -> &mut Self {
        match self.metrics.iter_mut().find(|m| m.kind == kind) {
            Some(existing) => existing.value = value,
            None => self.metrics.push(Metric { kind, value }),
        }
        self
    }
}

impl FromIterator<(MetricKind, f64)> for MetricSet {
    fn from_iter<I: IntoIterator<Item = (MetricKind, f64)>>(iter: I) -> Self {
        let mut set = MetricSet::new();
        for (kind, value) in iter {
            set.insert(kind, value);
        }
        set
    }
}

/// Clamps into `[0, 1]`; NaN collapses to `0.0` (excluded downstream).
#[inline]
pub(crate) fn sanitize_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Raw, un-normalized signals for one article, as reported to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RawMetrics {
    /// 1.0 unless the domain is listed in the reliability dataset.
    pub source_reliability: f64,
    /// Signed polarity, roughly `[-1, 1]`.
    pub sentiment: f64,
    /// Flesch reading ease, typically `0..=100`.
    pub readability: f64,
    /// `None` when no reference summary was supplied.
    pub rouge: Option<f64>,
    /// `None` when no reference summary was supplied.
    pub cosine_similarity: Option<f64>,
    pub tfidf: f64,
    /// Fraction of flagged words.
    pub bias: f64,
}
