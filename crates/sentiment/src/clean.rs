//! Text normalization ahead of scoring.

use std::collections::HashSet;

/// Normalizes raw document text into a scorer-friendly form.
///
/// Implementations must be pure: same input, same output, no I/O.
pub trait TextCleaner: Send + Sync {
    fn clean(&self, text: &str) -> String;
}

/// Common English stop words.
///
/// Apostrophes are stripped before matching, so contracted forms never
/// reach the filter as their dictionary spelling ("don't" arrives as
/// "dont" and passes through).
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now",
];

/// Default cleaner: lowercase, strip everything but letters and whitespace,
/// drop stop words, rejoin with single spaces.
pub struct BasicCleaner {
    stopwords: HashSet<&'static str>,
}

impl BasicCleaner {
    pub fn new() -> Self {
        Self { stopwords: STOPWORDS.iter().copied().collect() }
    }
}

impl Default for BasicCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCleaner for BasicCleaner {
    fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let letters_only: String = lowered
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
            .collect();
        letters_only
            .split_whitespace()
            .filter(|word| !self.stopwords.contains(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
