//! Keyword tokenizer shared by the gap analysis and the JD/tailoring heuristics.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// Word-like runs: letters, digits and the punctuation that shows up inside
/// tech names (`c++`, `c#`, `node.js`, `ci-cd`).
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9+#.\-]{3,}").expect("valid token regex"));

const MIN_TOKEN_LEN: usize = 3;

pub const STOP_WORDS: &[&str] = &[
    "the",
    "and",
    "for",
    "with",
    "this",
    "that",
    "from",
    "your",
    "you",
    "our",
    "are",
    "job",
    "role",
    "will",
    "have",
    "has",
    "had",
    "was",
    "were",
    "is",
    "as",
    "on",
    "in",
    "to",
    "of",
    "by",
    "at",
    "or",
    "an",
    "a",
    "be",
    "it",
    "we",
    "they",
    "their",
    "them",
    "who",
    "what",
    "how",
    "when",
    "why",
    "not",
    "any",
    "more",
    "less",
    "plus",
    "years",
    "year",
    "experience",
    "skills",
    "requirements",
    "responsibilities",
    "about",
];

/// Lower-cases `text` and returns its keyword tokens in order of appearance.
///
/// Sentence-ending dots are trimmed ("mongodb." → "mongodb") before the
/// length and stop-word checks, so re-tokenizing the space-joined output
/// returns the same tokens.
pub fn tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().trim_end_matches('.'))
        .filter(|w| w.len() >= MIN_TOKEN_LEN && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Occurrence count per token.
pub fn frequency(tokens: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

/// De-duplicates while keeping first-occurrence order.
pub fn unique(tokens: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect()
}
