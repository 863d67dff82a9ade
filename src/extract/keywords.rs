//! Keyword extraction for lexical relevance scoring.
//!
//! Normalizes text into a set of significant tokens: lower-cased,
//! punctuation stripped, stop words and short tokens dropped. Duplicates
//! collapse; order is irrelevant.

use std::collections::HashSet;

/// Common function words that carry no signal for overlap scoring.
/// Tokens of length <= 3 are dropped regardless, so only longer ones
/// need to be listed here.
const STOP_WORDS: &[&str] = &[
    "that", "this", "with", "from", "have", "been", "were", "they", "them", "their", "will",
    "would", "into", "about", "which", "there",
];

/// Extract the set of significant keywords from a text.
///
/// Lower-cases the input, replaces every character that is neither
/// alphanumeric/underscore nor whitespace with a space, splits on
/// whitespace, and drops stop words and tokens of length <= 3.
///
/// Empty text yields an empty set. Never fails.
pub fn keywords(text: &str) -> HashSet<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.len() > 3 && !STOP_WORDS.contains(w))
        .map(|w| w.to_string())
        .collect()
}
