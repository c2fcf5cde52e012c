//! Error types for modmerge-core

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use modmerge_content::MergeErrorKind;

/// Result type for modmerge-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in modmerge-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Target directory not found: {path}")]
    TargetNotFound { path: PathBuf },

    #[error("Failed to scan {path}: {message}")]
    Walk { path: PathBuf, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from modmerge-fs
    #[error(transparent)]
    Fs(#[from] modmerge_fs::Error),

    /// Configuration error from modmerge-meta
    #[error(transparent)]
    Meta(#[from] modmerge_meta::Error),

    /// Merge error from modmerge-content
    #[error(transparent)]
    Content(#[from] modmerge_content::Error),
}

/// Category of a per-file failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Parse,
    StructuralMerge,
    Render,
    Unsupported,
    Io,
}

impl From<MergeErrorKind> for FailureKind {
    fn from(kind: MergeErrorKind) -> Self {
        match kind {
            MergeErrorKind::Parse => Self::Parse,
            MergeErrorKind::StructuralMerge => Self::StructuralMerge,
            MergeErrorKind::Render => Self::Render,
            MergeErrorKind::Unsupported => Self::Unsupported,
        }
    }
}

impl Error {
    /// Category to record when this error fails a single file.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Content(e) => e.kind().into(),
            _ => FailureKind::Io,
        }
    }
}
