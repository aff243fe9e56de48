//! Grouping of flattened keys into per-variant size records.

use std::collections::BTreeSet;

use crate::flatten::FlatRecord;

/// A [`FlatRecord`] subset sharing one parent path, believed to describe a
/// single product variant.
pub type SizeRecord = FlatRecord;

/// Substrings of a key's last path segment that mark it as describing a
/// size or variant.
pub const SIZE_FIELD_MARKERS: [&str; 4] = ["size", "variant", "sku", "label"];

/// Collects one [`SizeRecord`] per distinct parent path holding a
/// size-indicating field, across all `records`.
///
/// A key without a dot has the empty parent, which collects the whole
/// record. Product schemas vary too much to be stricter about top-level
/// fields. Structurally equal records are kept once, in first-seen order.
pub fn match_size_records<'a, I>(records: I) -> Vec<SizeRecord>
where
    I: IntoIterator<Item = &'a FlatRecord>,
{
    let mut out: Vec<SizeRecord> = Vec::new();
    for record in records {
        let mut seen_prefixes = BTreeSet::new();
        for key in record.keys() {
            if !is_size_field(key) {
                continue;
            }
            let prefix = parent_prefix(key);
            if !seen_prefixes.insert(prefix) {
                continue;
            }
            let sub = records_under(record, prefix);
            if !out.contains(&sub) {
                out.push(sub);
            }
        }
    }
    out
}

fn is_size_field(key: &str) -> bool {
    let last = last_segment(key).to_lowercase();
    SIZE_FIELD_MARKERS.iter().any(|marker| last.contains(marker))
}

fn last_segment(key: &str) -> &str {
    key.rsplit_once('.').map_or(key, |(_, last)| last)
}

fn parent_prefix(key: &str) -> &str {
    key.rsplit_once('.').map_or("", |(parent, _)| parent)
}

fn records_under(record: &FlatRecord, prefix: &str) -> SizeRecord {
    record
        .iter()
        .filter(|(key, _)| key.starts_with(prefix))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
