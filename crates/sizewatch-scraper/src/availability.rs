//! Stock interpretation of size records for a target size.
//!
//! Two passes over the records that match the target size: a positive
//! quantity anywhere wins outright, then textual availability fields are
//! read in record order. When neither pass decides, the caller falls back
//! to page text.

use std::sync::LazyLock;

use regex::Regex;
use sizewatch_core::{Availability, Verdict};

use crate::size_records::SizeRecord;

/// Field values that read as "in stock" when matched exactly (lower-cased).
pub const TRUTHY_LITERALS: [&str; 9] = [
    "true",
    "in stock",
    "instock",
    "available",
    "yes",
    "in_stock",
    "in-stock",
    "availableforpurchase",
    "ok",
];

/// Field values that read as "out of stock" when matched exactly (lower-cased).
pub const FALSY_LITERALS: [&str; 8] = [
    "false",
    "out of stock",
    "outofstock",
    "unavailable",
    "no",
    "soldout",
    "sold out",
    "notavailable",
];

/// Key substrings whose values name a size.
pub const SIZE_LABEL_KEYS: [&str; 4] = ["size", "label", "variant", "name"];

/// Key substrings whose values carry a textual availability signal.
pub const AVAILABILITY_KEYS: [&str; 8] = [
    "avail",
    "in_stock",
    "instock",
    "stock",
    "isavailable",
    "inventory",
    "availabilitystatus",
    "status",
];

/// Key substrings whose values carry a stock count.
pub const QUANTITY_KEYS: [&str; 2] = ["qty", "quantity"];

// Word-bounded so "unavailable" never reads as "available". The spacing
// class also accepts schema.org URLs (`https://schema.org/InStock`).
static TRUTHY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:in[\s_-]?stock|available|ok|true)\b").expect("valid truthy regex")
});
static FALSY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:out[\s_-]?of[\s_-]?stock|sold[\s_-]?out|unavailable|false)\b")
        .expect("valid falsy regex")
});

/// Closed literal sets used to classify availability field values.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityVocabulary {
    pub truthy: &'static [&'static str],
    pub falsy: &'static [&'static str],
}

impl Default for AvailabilityVocabulary {
    fn default() -> Self {
        Self {
            truthy: &TRUTHY_LITERALS,
            falsy: &FALSY_LITERALS,
        }
    }
}

impl AvailabilityVocabulary {
    /// Classifies one raw field value. Truthy literals and patterns are
    /// checked before falsy ones.
    #[must_use]
    pub fn classify(&self, raw: &str) -> Option<Availability> {
        let lower = raw.trim().to_lowercase();
        if self.truthy.contains(&lower.as_str()) || TRUTHY_PATTERN.is_match(&lower) {
            return Some(Availability::InStock);
        }
        if self.falsy.contains(&lower.as_str()) || FALSY_PATTERN.is_match(&lower) {
            return Some(Availability::OutOfStock);
        }
        None
    }
}

/// Resolves size records into a verdict for one target size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpreter {
    vocabulary: AvailabilityVocabulary,
}

impl Interpreter {
    #[must_use]
    pub fn new(vocabulary: AvailabilityVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Returns `None` when no record matching `size` carries a decisive
    /// signal. That is "no conclusive result", not an Unknown verdict.
    #[must_use]
    pub fn interpret(&self, records: &[SizeRecord], size: &str) -> Option<Verdict> {
        let target = size.trim().to_lowercase();
        if target.is_empty() {
            return None;
        }
        let word = Regex::new(&format!(r"\b{}\b", regex::escape(&target))).ok()?;

        let matching: Vec<&SizeRecord> = records
            .iter()
            .filter(|record| record_matches_size(record, &target, &word))
            .collect();
        tracing::debug!(
            size = %target,
            records = records.len(),
            matching = matching.len(),
            "interpreting size records"
        );

        for record in &matching {
            if let Some(qty) = field_values(record, &QUANTITY_KEYS).find(|v| is_positive_count(v)) {
                return Some(Verdict::in_stock(format!("quantity={qty}")));
            }
        }

        for record in &matching {
            for value in field_values(record, &AVAILABILITY_KEYS) {
                match self.vocabulary.classify(&value) {
                    Some(Availability::InStock) => return Some(Verdict::in_stock(value)),
                    Some(Availability::OutOfStock) => return Some(Verdict::out_of_stock(value)),
                    _ => {}
                }
            }
        }

        None
    }
}

fn record_matches_size(record: &SizeRecord, target: &str, word: &Regex) -> bool {
    field_values(record, &SIZE_LABEL_KEYS).any(|value| {
        let value = value.to_lowercase();
        value == target || word.is_match(&value)
    })
}

/// String forms of every value whose lower-cased key contains one of `markers`.
fn field_values<'r>(
    record: &'r SizeRecord,
    markers: &'static [&'static str],
) -> impl Iterator<Item = String> + 'r {
    record
        .iter()
        .filter(move |(key, _)| {
            let key = key.to_lowercase();
            markers.iter().any(|marker| key.contains(marker))
        })
        .map(|(_, value)| value.to_string())
}

fn is_positive_count(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && value.parse::<u64>().map_or(true, |n| n > 0)
}

#[cfg(test)]
#[path = "availability_test.rs"]
mod tests;
