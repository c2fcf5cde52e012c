//! Canonical tokens for comparing key/value tree values
//!
//! A [`Canonical`] is hashable and compares the way list items are expected
//! to compare during a merge:
//!
//! - lists keep their order, so `[1, 2]` and `[2, 1]` differ
//! - maps are sorted by key, so insertion order does not matter
//! - integral floats equal the matching integer (`1.0 == 1`)

use serde_json::{Map, Number, Value};

/// Order-normalized, hashable form of a JSON value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Canonical {
    Null,
    Bool(bool),
    Int(i128),
    /// Bit pattern of a non-integral float
    Float(u64),
    String(String),
    List(Vec<Canonical>),
    Map(Vec<(String, Canonical)>),
}

/// Convert a value into its canonical token.
pub fn canonicalize(value: &Value) -> Canonical {
    match value {
        Value::Null => Canonical::Null,
        Value::Bool(b) => Canonical::Bool(*b),
        Value::Number(n) => canonical_number(n),
        Value::String(s) => Canonical::String(s.clone()),
        Value::Array(items) => Canonical::List(items.iter().map(canonicalize).collect()),
        Value::Object(map) => canonical_map(map),
    }
}

/// Canonical token for a map.
pub fn canonical_map(map: &Map<String, Value>) -> Canonical {
    let mut entries: Vec<(String, Canonical)> = map
        .iter()
        .map(|(k, v)| (k.clone(), canonicalize(v)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Canonical::Map(entries)
}

/// Whether two values are equal under canonical comparison.
pub fn canonical_eq(a: &Value, b: &Value) -> bool {
    canonicalize(a) == canonicalize(b)
}

fn canonical_number(n: &Number) -> Canonical {
    if let Some(i) = n.as_i64() {
        return Canonical::Int(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Canonical::Int(i128::from(u));
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    // Integral floats below 1e38 fit in an i128.
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e38 {
        Canonical::Int(f as i128)
    } else {
        Canonical::Float(f.to_bits())
    }
}
