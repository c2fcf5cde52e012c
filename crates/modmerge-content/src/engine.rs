//! Byte-level merge entry points
//!
//! Each function is a pure function of its inputs: it parses both documents,
//! merges, and renders. On any failure it returns an error and the caller
//! still holds its untouched target bytes.

use modmerge_meta::{DocumentFormat, Rule};

use crate::format::DocumentHandler;
use crate::handlers::{JsonHandler, XmlHandler};
use crate::{Error, Result};

/// Merge a source JSON document into a target JSON document.
pub fn merge_key_value(target: &[u8], source: &[u8], rule: &Rule) -> Result<Vec<u8>> {
    run(&JsonHandler::new(), target, source, rule)
}

/// Merge a source XML document into a target XML document.
pub fn merge_node_tree(target: &[u8], source: &[u8], rule: &Rule) -> Result<Vec<u8>> {
    run(&XmlHandler::new(), target, source, rule)
}

/// Merge two documents of `format`.
///
/// Opaque documents cannot be merged and always fail with
/// [`Error::UnsupportedFormat`].
pub fn merge_document(
    format: DocumentFormat,
    target: &[u8],
    source: &[u8],
    rule: &Rule,
) -> Result<Vec<u8>> {
    match format {
        DocumentFormat::KeyValue => merge_key_value(target, source, rule),
        DocumentFormat::NodeTree => merge_node_tree(target, source, rule),
        DocumentFormat::Opaque => Err(Error::UnsupportedFormat {
            format: format.label().to_string(),
        }),
    }
}

fn run<H: DocumentHandler>(
    handler: &H,
    target: &[u8],
    source: &[u8],
    rule: &Rule,
) -> Result<Vec<u8>> {
    let format = handler.format();
    tracing::debug!(
        format = format.label(),
        strategy = %rule.strategy,
        target_bytes = target.len(),
        source_bytes = source.len(),
        "merging document"
    );
    handler.merge_bytes(target, source, rule).inspect_err(|e| {
        tracing::debug!(format = format.label(), kind = ?e.kind(), error = %e, "merge failed");
    })
}
