//! TF-IDF cosine similarity between two text blobs.
//!
//! The vectorizer is fit fresh on exactly the two documents being compared,
//! with smoothed IDF and an English stop-word vocabulary filter. Tokens are
//! lowercase alphanumeric runs of at least two characters.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// English stop words excluded from the vectorization vocabulary.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "if", "in", "into", "is", "it", "its", "itself",
    "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Cosine similarity between the TF-IDF vectors of two text blobs.
///
/// Returns a value in `[0.0, 1.0]`. Either blob being empty, or reducing to
/// nothing after tokenization and stop-word removal, yields `0.0` — never an
/// error.
#[must_use]
pub fn text_similarity(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    let terms_a = term_frequencies(a);
    let terms_b = term_frequencies(b);
    if terms_a.is_empty() || terms_b.is_empty() {
        return 0.0;
    }

    // Vocabulary over both documents; smoothed IDF with n = 2 documents.
    let vocabulary: HashSet<&String> = terms_a.keys().chain(terms_b.keys()).collect();
    let mut vec_a = Vec::with_capacity(vocabulary.len());
    let mut vec_b = Vec::with_capacity(vocabulary.len());

    for term in vocabulary {
        let tf_a = terms_a.get(term).copied().unwrap_or(0.0);
        let tf_b = terms_b.get(term).copied().unwrap_or(0.0);
        let df = f64::from(u8::from(tf_a > 0.0)) + f64::from(u8::from(tf_b > 0.0));
        let idf = ((1.0 + 2.0) / (1.0 + df)).ln() + 1.0;
        vec_a.push(tf_a * idf);
        vec_b.push(tf_b * idf);
    }

    cosine_similarity(&vec_a, &vec_b)
}

/// Raw term counts for one document, stop words excluded.
fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let mut counts: HashMap<String, f64> = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }
    counts
}

/// Lowercase alphanumeric runs of at least two characters, minus stop words.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|token| !stop_words().contains(token.as_str()))
}

/// Cosine similarity between two vectors. Returns 0.0 for zero-norm inputs.
fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
