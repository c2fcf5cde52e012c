//! Merge rule schema
//!
//! A rule is the merge policy for one document. It is read from the install
//! configuration and never changes during a merge.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "strategy": "collection",
//!   "append_keys": ["objectSpawnersArr"],
//!   "match_by": { "objectSpawnersArr": ["name"] },
//!   "id_attributes": ["name", "pos"],
//!   "property_tags": ["difficulty"]
//! }
//! ```
//!
//! Every field is optional.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// How a document is reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Replace the whole target document with the source
    Overwrite,
    /// Match nodes by tag plus identity attributes
    #[default]
    Collection,
    /// Match nodes by tag alone; one node per tag
    Settings,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Collection => "collection",
            Self::Settings => "settings",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merge policy selected for one document path
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub strategy: Strategy,
    /// Keys whose list values are appended to instead of overwritten.
    /// Key/value documents only.
    pub append_keys: IndexSet<String>,
    /// Per append key, the fields that identify a list item.
    /// Key/value documents only.
    pub match_by: IndexMap<String, Vec<String>>,
    /// Attributes that identify a node, in priority order.
    /// Node-tree documents only.
    pub id_attributes: Vec<String>,
    /// Tags that are matched by tag alone even under `Collection`.
    /// Node-tree documents only.
    pub property_tags: IndexSet<String>,
}

impl Rule {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_append_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn with_match_by<I, S>(mut self, key: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.match_by
            .insert(key.into(), fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_id_attributes<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_attributes = attrs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.property_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Whether the whole target document is replaced.
    pub fn is_overwrite(&self) -> bool {
        self.strategy == Strategy::Overwrite
    }

    /// Whether `key`'s list value is appended to rather than overwritten.
    pub fn appends(&self, key: &str) -> bool {
        self.append_keys.contains(key)
    }

    /// Identity fields for list items under `key`, if configured.
    pub fn match_fields(&self, key: &str) -> Option<&[String]> {
        self.match_by.get(key).map(Vec::as_slice)
    }

    /// Whether `tag` is forced to singleton identity. Case-insensitive.
    pub fn is_property_tag(&self, tag: &str) -> bool {
        self.property_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}
