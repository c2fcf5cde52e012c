//! Key/value tree merge
//!
//! For every key of the source map:
//!
//! | target has key? | values        | result                                  |
//! |-----------------|---------------|-----------------------------------------|
//! | no              | any           | source value inserted                   |
//! | yes             | map + map     | merged recursively with the same rule   |
//! | yes             | list + list   | appended if the key is an append key,   |
//! |                 |               | otherwise overwritten                   |
//! | yes             | anything else | overwritten by the source value         |
//!
//! Rules are file-scoped: a key named in `append_keys` or `match_by` gets
//! append semantics at every depth of the document.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use modmerge_meta::Rule;

use crate::canonical::{Canonical, canonicalize};
use crate::{Error, Result};

/// Merge `source` into `target` under `rule`.
///
/// New keys are appended after the existing ones; existing keys keep their
/// position.
pub fn merge_maps(
    target: &mut Map<String, Value>,
    source: Map<String, Value>,
    rule: &Rule,
) -> Result<()> {
    for (key, source_value) in source {
        match target.get_mut(&key) {
            Some(target_value) => merge_value(&key, target_value, source_value, rule)?,
            None => {
                target.insert(key, source_value);
            }
        }
    }
    Ok(())
}

fn merge_value(key: &str, target: &mut Value, source: Value, rule: &Rule) -> Result<()> {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            merge_maps(target_map, source_map, rule)
        }
        (Value::Array(target_items), Value::Array(source_items)) => {
            if !rule.appends(key) {
                *target_items = source_items;
                return Ok(());
            }
            match rule.match_fields(key) {
                Some(fields) => append_matched(target_items, source_items, fields, rule),
                None => {
                    append_unique(target_items, source_items);
                    Ok(())
                }
            }
        }
        // Scalars and mismatched shapes: the source wins.
        (slot, source) => {
            *slot = source;
            Ok(())
        }
    }
}

/// Append source items not already present, in source order.
fn append_unique(target: &mut Vec<Value>, source: Vec<Value>) {
    let mut seen: HashSet<Canonical> = target.iter().map(canonicalize).collect();
    for item in source {
        if seen.insert(canonicalize(&item)) {
            target.push(item);
        }
    }
}

/// Merge map items that share an identity, append the rest.
///
/// The identity of a map item is the tuple of its `fields` values, with a
/// missing field counting as `null`. When several target items share an
/// identity, the last one receives the merge.
fn append_matched(
    target: &mut Vec<Value>,
    source: Vec<Value>,
    fields: &[String],
    rule: &Rule,
) -> Result<()> {
    let mut index: HashMap<Vec<Canonical>, usize> = HashMap::new();
    for (idx, item) in target.iter().enumerate() {
        if let Value::Object(map) = item {
            index.insert(item_identity(map, fields), idx);
        }
    }

    for item in source {
        match item {
            Value::Object(map) => {
                let identity = item_identity(&map, fields);
                match index.get(&identity) {
                    Some(&idx) => match target.get_mut(idx) {
                        Some(Value::Object(existing)) => merge_maps(existing, map, rule)?,
                        _ => {
                            return Err(Error::structural(format!(
                                "list item {idx} is no longer a map"
                            )));
                        }
                    },
                    None => target.push(Value::Object(map)),
                }
            }
            other => {
                let token = canonicalize(&other);
                if !target.iter().any(|existing| canonicalize(existing) == token) {
                    target.push(other);
                }
            }
        }
    }
    Ok(())
}

fn item_identity(map: &Map<String, Value>, fields: &[String]) -> Vec<Canonical> {
    fields
        .iter()
        .map(|f| map.get(f).map_or(Canonical::Null, canonicalize))
        .collect()
}
