//! Phrase-pattern fallback over the visible page text.
//!
//! Rules run in order and the first hit wins:
//! 1. size token directly followed by a negative phrase
//! 2. size token followed anywhere later by a positive phrase
//! 3. any positive phrase
//! 4. any negative phrase
//!
//! Rules 3 and 4 ignore the size entirely. They trade precision for recall
//! on pages that render one size at a time.
//!
//! Only the size token is word-bounded. Phrases match anywhere, so
//! "unavailable" also contains the positive phrase "available".

use std::sync::LazyLock;

use regex::Regex;
use sizewatch_core::Verdict;

pub const NEGATIVE_PHRASES: [&str; 3] = ["out of stock", "sold out", "unavailable"];
pub const POSITIVE_PHRASES: [&str; 4] = ["add to bag", "add to cart", "in stock", "available"];

pub(crate) static POSITIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?:{})", POSITIVE_PHRASES.join("|"))).expect("valid positive regex")
});
pub(crate) static NEGATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?:{})", NEGATIVE_PHRASES.join("|"))).expect("valid negative regex")
});

/// Word-bounded regex source for a size label, or `None` for a blank label.
pub(crate) fn size_token_pattern(size: &str) -> Option<String> {
    let size = size.trim().to_lowercase();
    if size.is_empty() {
        return None;
    }
    Some(format!(r"\b{}\b", regex::escape(&size)))
}

/// Decides a verdict from page `text` alone. Always returns a verdict;
/// [`Verdict::unknown`] when no rule applies.
#[must_use]
pub fn text_fallback(text: &str, size: &str) -> Verdict {
    let text = text.to_lowercase();

    if let Some(token) = size_token_pattern(size) {
        let negative = NEGATIVE_PHRASES.join("|");
        let positive = POSITIVE_PHRASES.join("|");
        let size_then_negative = Regex::new(&format!(r"{token}\s*[-–:]?\s*(?:{negative})"));
        let size_then_positive = Regex::new(&format!(r"(?s){token}.*(?:{positive})"));

        if size_then_negative.is_ok_and(|re| re.is_match(&text)) {
            return Verdict::out_of_stock("text: out of stock");
        }
        if size_then_positive.is_ok_and(|re| re.is_match(&text)) {
            return Verdict::in_stock("text: likely in stock");
        }
    }

    if POSITIVE_RE.is_match(&text) {
        return Verdict::in_stock("text: add to bag found");
    }
    if NEGATIVE_RE.is_match(&text) {
        return Verdict::out_of_stock("text: global out of stock");
    }
    Verdict::unknown()
}
