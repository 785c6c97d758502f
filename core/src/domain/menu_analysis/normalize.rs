use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Comparison key for preference terms and haystack fragments: trimmed,
/// lowercased, with every whitespace character removed.
pub fn normalize_term(term: &str) -> String {
    WHITESPACE
        .replace_all(&term.trim().to_lowercase(), "")
        .into_owned()
}

/// Lowercases and collapses whitespace runs into single spaces.
pub fn normalize_text(text: &str) -> String {
    WHITESPACE
        .replace_all(&text.to_lowercase(), " ")
        .into_owned()
}
