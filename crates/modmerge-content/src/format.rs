//! Handler trait shared by the document formats

use modmerge_meta::{DocumentFormat, Rule};

use crate::Result;

/// Parse, merge, and render one document format
pub trait DocumentHandler: Send + Sync {
    /// Parsed, owned document tree
    type Tree;

    /// Format identifier
    fn format(&self) -> DocumentFormat;

    /// Parse UTF-8 document bytes.
    fn parse(&self, source: &[u8]) -> Result<Self::Tree>;

    /// Merge `source` into `target` in place.
    fn merge(&self, target: &mut Self::Tree, source: Self::Tree, rule: &Rule) -> Result<()>;

    /// Render a tree back to document bytes.
    fn render(&self, tree: &Self::Tree) -> Result<Vec<u8>>;

    /// Parse both documents, merge, and render the result.
    ///
    /// Both inputs are parsed before anything is merged, so a malformed
    /// source never leaves behind a half-merged target.
    fn merge_bytes(&self, target: &[u8], source: &[u8], rule: &Rule) -> Result<Vec<u8>> {
        let mut target_tree = self.parse(target)?;
        let source_tree = self.parse(source)?;
        self.merge(&mut target_tree, source_tree, rule)?;
        self.render(&target_tree)
    }
}

/// Decode document bytes as UTF-8, tolerating a byte order mark.
pub(crate) fn decode_utf8<'a>(format: DocumentFormat, bytes: &'a [u8]) -> Result<&'a str> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| crate::Error::parse(format.label(), format!("invalid UTF-8: {e}")))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}
