use super::text::{count_sentences, count_syllables, tokenize};

/// Flesch reading ease: `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`.
///
/// Unbounded in principle, typically `0..=100`. Returns `0.0` when the text has no
/// words or no sentences.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let words = tokenize(text);
    let sentences = count_sentences(text);

    if words.is_empty() || sentences == 0 {
        return 0.0;
    }

    let num_words = words.len() as f64;
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    206.835 - 1.015 * (num_words / sentences as f64) - 84.6 * (syllables as f64 / num_words)
}
