//! Term extraction shared by indexing and query projection.

use std::sync::LazyLock;

use regex::Regex;

/// Two or more word characters between word boundaries.
static TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("unreachable error: invalid term pattern"));

/// Lowercase `text` and return its terms in reading order.
///
/// Single characters and punctuation never become terms.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_PATTERN.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}
