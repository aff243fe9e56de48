//! Diagnostic excerpts of page text around size and stock phrases.

use regex::Regex;

use crate::text_fallback::{size_token_pattern, NEGATIVE_RE, POSITIVE_RE};

/// Characters of context kept on each side of a hit.
const SNIPPET_RADIUS: usize = 40;
const MAX_SNIPPETS: usize = 20;

/// Windows of `text` around every occurrence of the size token and every
/// stock phrase, in text order, de-duplicated and capped.
#[must_use]
pub fn candidate_snippets(text: &str, size: &str) -> Vec<String> {
    let size_re = size_token_pattern(size).and_then(|p| Regex::new(&p).ok());

    let mut hits: Vec<(usize, usize)> = POSITIVE_RE
        .find_iter(text)
        .chain(NEGATIVE_RE.find_iter(text))
        .chain(size_re.iter().flat_map(|re| re.find_iter(text)))
        .map(|m| (m.start(), m.end()))
        .collect();
    hits.sort_unstable();

    let mut snippets: Vec<String> = Vec::new();
    for (start, end) in hits {
        let snippet = window(text, start, end);
        if !snippet.is_empty() && !snippets.contains(&snippet) {
            snippets.push(snippet);
        }
        if snippets.len() >= MAX_SNIPPETS {
            break;
        }
    }
    snippets
}

/// Slice of `text` spanning `SNIPPET_RADIUS` characters either side of
/// `start..end`. Both offsets are match boundaries, so they sit on chars.
fn window(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(SNIPPET_RADIUS - 1)
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(SNIPPET_RADIUS)
        .map_or(text.len(), |(i, _)| end + i);

    text[from..to].trim().to_string()
}
