//! XML (labeled-node tree) handler

use modmerge_meta::{DocumentFormat, Rule};

use crate::error::Result;
use crate::format::{DocumentHandler, decode_utf8};
use crate::merge::merge_elements;
use crate::node::Element;

/// Handler for XML documents
///
/// Documents are treated as namespace-unaware: prefixed names are kept
/// verbatim and `xmlns` declarations are ordinary attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlHandler;

impl XmlHandler {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentHandler for XmlHandler {
    type Tree = Element;

    fn format(&self) -> DocumentFormat {
        DocumentFormat::NodeTree
    }

    fn parse(&self, source: &[u8]) -> Result<Self::Tree> {
        Element::parse(decode_utf8(self.format(), source)?)
    }

    fn merge(&self, target: &mut Self::Tree, source: Self::Tree, rule: &Rule) -> Result<()> {
        merge_elements(target, source, rule);
        Ok(())
    }

    fn render(&self, tree: &Self::Tree) -> Result<Vec<u8>> {
        Ok(tree.to_xml_string().into_bytes())
    }
}
