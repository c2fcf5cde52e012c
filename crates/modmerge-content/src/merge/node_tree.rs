//! Labeled-node tree merge
//!
//! The root is never matched itself; only its descendants are. For each
//! source child:
//!
//! - a target child with the same identity gets the source attributes
//!   (source wins on collision, target-only attributes stay), the source
//!   text if it is not blank, and a recursive merge of the grandchildren;
//! - otherwise the source child is appended verbatim.
//!
//! Target children are never removed or reordered.

use std::collections::HashMap;

use modmerge_meta::Rule;

use crate::identity::node_identity;
use crate::node::Element;

/// Merge the children of `source` into the children of `target`.
///
/// When two target children share an identity only the later one can be
/// matched; the earlier one is left as it is.
pub fn merge_elements(target: &mut Element, source: Element, rule: &Rule) {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(target.children.len());
    for (idx, child) in target.children.iter().enumerate() {
        index.insert(node_identity(child, rule), idx);
    }

    for child in source.children {
        let identity = node_identity(&child, rule);
        match index.get(&identity) {
            Some(&idx) => {
                tracing::trace!(%identity, "matched node");
                update_matched(&mut target.children[idx], child, rule);
            }
            None => {
                tracing::trace!(%identity, "appended node");
                target.children.push(child);
            }
        }
    }
}

fn update_matched(target: &mut Element, mut source: Element, rule: &Rule) {
    for (name, value) in std::mem::take(&mut source.attributes) {
        target.attributes.insert(name, value);
    }
    if let Some(text) = source.text.take()
        && !text.trim().is_empty()
    {
        target.text = Some(text);
    }
    merge_elements(target, source, rule);
}
