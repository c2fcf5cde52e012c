//! Reconciliation engine for structured documents
//!
//! Merges a source document shipped by a content package into a deployed
//! target document without discarding what the operator already changed
//! there. Two document shapes are supported:
//!
//! - key/value trees (JSON), merged key by key with optional list append
//!   and item matching ([`merge::key_value`])
//! - labeled-node trees (XML), merged child by child using node identity
//!   strings ([`identity`], [`merge::node_tree`])
//!
//! The byte-level entry points in [`engine`] parse both inputs, merge, and
//! render. They either return a complete document or an error; the caller's
//! input is never modified.

pub mod canonical;
pub mod engine;
pub mod error;
pub mod format;
pub mod handlers;
pub mod identity;
pub mod merge;
pub mod node;

pub use canonical::{Canonical, canonicalize};
pub use engine::{merge_document, merge_key_value, merge_node_tree};
pub use error::{Error, MergeErrorKind, Result};
pub use format::DocumentHandler;
pub use handlers::{JsonHandler, XmlHandler};
pub use identity::node_identity;
pub use modmerge_meta::{DocumentFormat, Rule, Strategy};
pub use node::Element;
