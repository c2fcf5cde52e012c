//! Document format detection

use serde::{Deserialize, Serialize};

use modmerge_fs::NormalizedPath;

/// How a document is reconciled, decided by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Nested key/value tree (`.json`)
    KeyValue,
    /// Labeled node tree (`.xml`)
    NodeTree,
    /// Anything else; copied, never merged
    Opaque,
}

impl DocumentFormat {
    /// Detect format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => Self::KeyValue,
            "xml" => Self::NodeTree,
            _ => Self::Opaque,
        }
    }

    /// Detect format from a path's extension.
    pub fn from_path(path: impl Into<NormalizedPath>) -> Self {
        path.into()
            .extension()
            .map_or(Self::Opaque, Self::from_extension)
    }

    /// Name used in log lines and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::KeyValue => "JSON",
            Self::NodeTree => "XML",
            Self::Opaque => "opaque",
        }
    }
}
