//! SHA-256 checksum utilities
//!
//! Install reports carry the checksum of every file they write so that a
//! later run, or a script reading `--json` output, can tell whether a file
//! changed.

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// Checksum of in-memory content, formatted as `"sha256:<hex>"`.
pub fn compute_content_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}
