//! Flattening of nested JSON into key-path → scalar records.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Key paths (`offers[0].sku`) mapped to the scalar found there.
pub type FlatRecord = BTreeMap<String, Scalar>;

/// A JSON leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

/// Flattens `value` by recursive descent. Object keys extend the path with
/// `.key`, array elements with `[i]`; empty containers produce no entries.
#[must_use]
pub fn flatten(value: &Value) -> FlatRecord {
    let mut out = FlatRecord::new();
    flatten_into(value, "", &mut out);
    out
}

fn flatten_into(value: &Value, prefix: &str, out: &mut FlatRecord) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, &path, out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                flatten_into(child, &format!("{prefix}[{i}]"), out);
            }
        }
        Value::Null => {
            out.insert(prefix.to_string(), Scalar::Null);
        }
        Value::Bool(b) => {
            out.insert(prefix.to_string(), Scalar::Bool(*b));
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), Scalar::Number(n.clone()));
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), Scalar::String(s.clone()));
        }
    }
}
