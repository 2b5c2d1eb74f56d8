//! Overlap and TF-IDF based signals.

use std::collections::{HashMap, HashSet};

use super::text::{tokenize, vocabulary_tokens};

/// Unigram ROUGE recall over token *sets*: `|gen ∩ ref| / |ref|`.
pub fn rouge_recall(generated: &str, reference: &str) -> f64 {
    let generated: HashSet<String> = tokenize(generated).into_iter().collect();
    let reference: HashSet<String> = tokenize(reference).into_iter().collect();

    if reference.is_empty() {
        return 0.0;
    }

    let matches = generated.intersection(&reference).count();
    matches as f64 / reference.len() as f64
}

/// TF-IDF weights fitted over a small corpus.
///
/// Uses smoothed idf, `ln((1 + n) / (1 + df)) + 1`, and L2-normalized rows.
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    idf: HashMap<String, f64>,
}

impl TfidfModel {
    pub fn fit(documents: &[&str]) -> Self {
        let n = documents.len() as f64;
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique: HashSet<String> = vocabulary_tokens(doc).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let idf = document_frequency
            .into_iter()
            .map(|(term, df)| {
                let weight = ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0;
                (term, weight)
            })
            .collect();

        Self { idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    /// L2-normalized TF-IDF vector of `document`; terms outside the fitted
    /// vocabulary are ignored.
    pub fn transform(&self, document: &str) -> HashMap<String, f64> {
        let mut counts: HashMap<String, f64> = HashMap::new();
        for term in vocabulary_tokens(document) {
            if self.idf.contains_key(&term) {
                *counts.entry(term).or_insert(0.0) += 1.0;
            }
        }

        let mut weights: HashMap<String, f64> = counts
            .into_iter()
            .map(|(term, tf)| {
                let idf = self.idf.get(&term).copied().unwrap_or(1.0);
                (term, tf * idf)
            })
            .collect();

        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for w in weights.values_mut() {
                *w /= norm;
            }
        }

        weights
    }
}

/// Mean non-zero TF-IDF weight of a document against itself.
pub fn tfidf_density(text: &str) -> f64 {
    let model = TfidfModel::fit(&[text]);
    let weights = model.transform(text);

    if weights.is_empty() {
        return 0.0;
    }

    weights.values().sum::<f64>() / weights.len() as f64
}

/// Cosine similarity of two texts in a TF-IDF space fitted on both.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let model = TfidfModel::fit(&[a, b]);
    let va = model.transform(a);
    let vb = model.transform(b);

    if va.is_empty() || vb.is_empty() {
        return 0.0;
    }

    // Rows are unit length, so the dot product is the cosine.
    va.iter()
        .filter_map(|(term, wa)| vb.get(term).map(|wb| wa * wb))
        .sum::<f64>()
        .clamp(0.0, 1.0)
}
