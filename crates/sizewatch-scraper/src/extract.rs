//! Structured signal extraction from `<script>` elements.
//!
//! Two sources are recognised:
//! - `<script type="application/ld+json">` blocks, parsed whole.
//! - Any other script whose text looks relevant, scanned with the brace
//!   tokenizer for embedded JSON objects.
//!
//! Failures are isolated per block: a malformed payload is dropped and the
//! scan moves on.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::braces::brace_candidates;

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("valid script regex")
});
static JSON_LD_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\btype\s*=\s*["']?application/ld\+json"#).expect("valid json-ld type regex")
});

/// Keywords that mark inline script text as worth scanning. Matched
/// case-insensitively as substrings.
pub const RELEVANCE_KEYWORDS: [&str; 8] = [
    "availability",
    "inStock",
    "availabilityStatus",
    "offers",
    "variants",
    "sku",
    "size",
    "inventory",
];

/// Where a [`StructuredBlock`] was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSource {
    JsonLd,
    InlineScript,
}

/// A JSON object recovered from page markup.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredBlock {
    pub source: BlockSource,
    pub value: Value,
}

/// Lazily yields every structured block in `html`, in document order.
///
/// Never fails: unparseable payloads are skipped individually.
pub fn structured_blocks(html: &str) -> impl Iterator<Item = StructuredBlock> + '_ {
    SCRIPT_RE.captures_iter(html).flat_map(|cap| {
        let attrs = cap.get(1).map_or("", |m| m.as_str());
        let body = cap.get(2).map_or("", |m| m.as_str());
        script_blocks(attrs, body)
    })
}

fn script_blocks<'a>(attrs: &str, body: &'a str) -> Box<dyn Iterator<Item = StructuredBlock> + 'a> {
    if JSON_LD_TYPE_RE.is_match(attrs) {
        Box::new(json_ld_blocks(body).into_iter())
    } else if is_relevant(body) {
        Box::new(inline_blocks(body))
    } else {
        Box::new(std::iter::empty())
    }
}

fn json_ld_blocks(body: &str) -> Vec<StructuredBlock> {
    let raw = body.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "discarding malformed JSON-LD block");
            return Vec::new();
        }
    };

    let objects: Vec<Value> = match value {
        Value::Array(items) => items.into_iter().filter(Value::is_object).collect(),
        object @ Value::Object(_) => vec![object],
        _ => Vec::new(),
    };
    objects
        .into_iter()
        .map(|value| StructuredBlock {
            source: BlockSource::JsonLd,
            value,
        })
        .collect()
}

fn inline_blocks(body: &str) -> impl Iterator<Item = StructuredBlock> + '_ {
    brace_candidates(body)
        .filter(|candidate| is_relevant(candidate))
        .filter_map(parse_candidate)
        .map(|value| StructuredBlock {
            source: BlockSource::InlineScript,
            value,
        })
}

/// Returns `true` when `text` contains an opening brace and at least one
/// [`RELEVANCE_KEYWORDS`] entry.
#[must_use]
pub fn is_relevant(text: &str) -> bool {
    if !text.contains('{') {
        return false;
    }
    let lower = text.to_lowercase();
    RELEVANCE_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(&keyword.to_lowercase()))
}

/// Strict parse first, then one retry with single quotes coerced to double
/// quotes (covers JS object literals like `{'size': 'M'}`).
fn parse_candidate(candidate: &str) -> Option<Value> {
    let value = serde_json::from_str::<Value>(candidate)
        .or_else(|_| serde_json::from_str::<Value>(&candidate.replace('\'', "\"")));
    match value {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(
                error = %e,
                len = candidate.len(),
                "discarding unparseable inline script object"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn values(html: &str) -> Vec<Value> {
        structured_blocks(html).map(|b| b.value).collect()
    }

    #[test]
    fn extracts_json_ld_object() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type":"Product","size":"M","quantity":5}</script>
        </head></html>"#;
        let blocks: Vec<StructuredBlock> = structured_blocks(html).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].source, BlockSource::JsonLd);
        assert_eq!(
            blocks[0].value,
            json!({"@type":"Product","size":"M","quantity":5})
        );
    }

    #[test]
    fn json_ld_list_yields_each_object() {
        let html = r#"<script type='application/ld+json'>
            [{"size":"S"}, 42, "text", {"size":"M"}]
        </script>"#;
        assert_eq!(values(html), vec![json!({"size":"S"}), json!({"size":"M"})]);
    }

    #[test]
    fn malformed_json_ld_is_skipped_without_losing_others() {
        let html = r#"
            <script type="application/ld+json">{"size": "S", broken</script>
            <script type="application/ld+json">{"availability":"InStock","size":"S"}</script>
        "#;
        assert_eq!(
            values(html),
            vec![json!({"availability":"InStock","size":"S"})]
        );
    }

    #[test]
    fn json_ld_is_not_rescanned_as_inline_script() {
        let html = r#"<script type="application/ld+json">{"offers":{"sku":"1"}}</script>"#;
        let blocks: Vec<StructuredBlock> = structured_blocks(html).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].source, BlockSource::JsonLd);
    }

    #[test]
    fn extracts_embedded_object_from_inline_script() {
        let html = r#"<script>
            window.__PRODUCT__ = {"variants":[{"size":"L","inventory_quantity":0}]};
            track("view");
        </script>"#;
        let blocks: Vec<StructuredBlock> = structured_blocks(html).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].source, BlockSource::InlineScript);
        assert_eq!(
            blocks[0].value,
            json!({"variants":[{"size":"L","inventory_quantity":0}]})
        );
    }

    #[test]
    fn coerces_single_quoted_objects() {
        let html = "<script>var v = {'size': 'M', 'availability': 'in stock'};</script>";
        assert_eq!(
            values(html),
            vec![json!({"size":"M","availability":"in stock"})]
        );
    }

    #[test]
    fn skips_scripts_without_relevant_keywords() {
        let html = r#"<script>var config = {"theme":"dark","locale":"en"};</script>"#;
        assert!(values(html).is_empty());
    }

    #[test]
    fn skips_irrelevant_candidates_inside_relevant_script() {
        let html = r#"<script>
            var a = {"theme":"dark"};
            var b = {"sku":"123"};
        </script>"#;
        assert_eq!(values(html), vec![json!({"sku":"123"})]);
    }

    #[test]
    fn unparseable_candidate_does_not_stop_later_candidates() {
        let html = r#"<script>
            var a = {size: M, nope};
            var b = {"size":"M","qty":2};
        </script>"#;
        assert_eq!(values(html), vec![json!({"size":"M","qty":2})]);
    }

    #[test]
    fn blocks_follow_document_order() {
        let html = r#"
            <script>var first = {"sku":"A"};</script>
            <script type="application/ld+json">{"sku":"B"}</script>
            <script>var third = {"sku":"C"};</script>
        "#;
        assert_eq!(
            values(html),
            vec![json!({"sku":"A"}), json!({"sku":"B"}), json!({"sku":"C"})]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let html = r#"
            <script type="application/ld+json">{"sku":"A"}</script>
            <script type="application/ld+json">{"sku":"A"}</script>
        "#;
        assert_eq!(values(html).len(), 2);
    }

    #[test]
    fn relevance_is_case_insensitive() {
        assert!(is_relevant(r#"{"INSTOCK": true}"#));
        assert!(is_relevant(r#"{"AvailabilityStatus": "x"}"#));
        assert!(!is_relevant("size = 'M'"));
        assert!(!is_relevant(r#"{"color":"red"}"#));
    }

    #[test]
    fn document_without_scripts_yields_nothing() {
        assert!(values("<html><body><p>Size M</p></body></html>").is_empty());
    }
}
