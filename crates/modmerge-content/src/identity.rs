//! Node identity strings
//!
//! Two sibling nodes with equal identity are the same logical node: the
//! source one is merged into the target one instead of being appended.
//!
//! - `Settings` strategy, or a tag listed in `property_tags`: the lowercased
//!   tag alone, so each tag is a singleton.
//! - Otherwise the lowercased tag followed by `name=value` for each
//!   configured id attribute the node carries, in configuration order. A node
//!   carrying none of them is identified by all of its attributes, sorted by
//!   name. Parts are joined with `|`.

use modmerge_meta::{Rule, Strategy};

use crate::node::Element;

/// Identity string of `node` under `rule`.
pub fn node_identity(node: &Element, rule: &Rule) -> String {
    let tag = node.tag.to_lowercase();

    if rule.strategy == Strategy::Settings || rule.is_property_tag(&tag) {
        return tag;
    }

    let mut parts = vec![tag];
    for name in &rule.id_attributes {
        if let Some(value) = node.attributes.get(name) {
            parts.push(format!("{name}={value}"));
        }
    }

    if parts.len() == 1 {
        let mut all: Vec<(&String, &String)> = node.attributes.iter().collect();
        all.sort();
        parts.extend(all.into_iter().map(|(name, value)| format!("{name}={value}")));
    }

    parts.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn item() -> Element {
        Element::new("Item")
            .with_attribute("pos", "1,2,3")
            .with_attribute("name", "tent")
            .with_attribute("color", "green")
    }

    #[rstest]
    #[case(Rule::new(Strategy::Settings), "item")]
    #[case(Rule::default().with_property_tags(["item"]), "item")]
    #[case(Rule::default().with_id_attributes(["name", "pos"]), "item|name=tent|pos=1,2,3")]
    #[case(Rule::default().with_id_attributes(["pos", "name"]), "item|pos=1,2,3|name=tent")]
    #[case(Rule::default().with_id_attributes(["pos", "x"]), "item|pos=1,2,3")]
    #[case(Rule::default().with_id_attributes(["x", "z"]), "item|color=green|name=tent|pos=1,2,3")]
    #[case(Rule::default(), "item|color=green|name=tent|pos=1,2,3")]
    fn test_identity(#[case] rule: Rule, #[case] expected: &str) {
        assert_eq!(node_identity(&item(), &rule), expected);
    }

    #[test]
    fn test_bare_node_is_its_tag() {
        let rule = Rule::default().with_id_attributes(["name"]);
        assert_eq!(node_identity(&Element::new("Weather"), &rule), "weather");
    }

    #[test]
    fn test_fallback_ignores_document_attribute_order() {
        let a = Element::new("e")
            .with_attribute("b", "2")
            .with_attribute("a", "1");
        let b = Element::new("e")
            .with_attribute("a", "1")
            .with_attribute("b", "2");
        let rule = Rule::default();
        assert_eq!(node_identity(&a, &rule), node_identity(&b, &rule));
    }

    #[test]
    fn test_property_tag_only_affects_listed_tags() {
        let rule = Rule::default()
            .with_id_attributes(["name"])
            .with_property_tags(["difficulty"]);
        let other = Element::new("zone").with_attribute("name", "north");
        assert_eq!(node_identity(&other, &rule), "zone|name=north");
        let listed = Element::new("Difficulty").with_attribute("name", "hard");
        assert_eq!(node_identity(&listed, &rule), "difficulty");
    }
}
