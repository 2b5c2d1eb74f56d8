//! Lexicon polarity.
//!
//! Each token is positive, negative or neutral; with `pos`, `neg` and `neu` the
//! proportions of each, polarity is `(pos - neg) / (pos + neg + neu)`.

use super::text::tokenize;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "positive", "success", "successful", "win", "wins", "won",
    "benefit", "benefits", "improve", "improved", "improvement", "growth", "gain", "gains",
    "hope", "hopeful", "happy", "safe", "secure", "strong", "stronger", "support", "praise",
    "praised", "celebrate", "celebrated", "recovery", "recover", "progress", "peace",
    "agreement", "best", "better", "love", "wonderful", "amazing", "brilliant", "boost",
    "thrive", "welcome", "confident", "achieve", "achievement",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "negative", "fail", "failed", "failure", "lose", "loss",
    "losses", "crisis", "disaster", "catastrophe", "danger", "dangerous", "threat", "fear",
    "afraid", "angry", "anger", "hate", "kill", "killed", "death", "dead", "attack",
    "attacked", "war", "violence", "violent", "corrupt", "corruption", "scandal", "fraud",
    "lie", "lies", "worst", "worse", "shocking", "outrage", "collapse", "decline", "weak",
    "chaos", "panic", "destroy", "destroyed", "evil",
];

/// Signed polarity in `[-1, 1]`; `0.0` for text without tokens.
pub fn sentiment_polarity(text: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }

    let total = tokens.len() as f64;
    let positive = tokens
        .iter()
        .filter(|t| POSITIVE_WORDS.contains(&t.as_str()))
        .count() as f64;
    let negative = tokens
        .iter()
        .filter(|t| NEGATIVE_WORDS.contains(&t.as_str()))
        .count() as f64;

    let pos = positive / total;
    let neg = negative / total;
    let neu = (total - positive - negative) / total;

    let denominator = pos + neg + neu;
    if denominator == 0.0 {
        return 0.0;
    }

    (pos - neg) / denominator
}
