//! Error types for modmerge-content

/// Result type for modmerge-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling a document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    /// A tree invariant the merge relies on did not hold
    #[error("Structural merge error: {message}")]
    StructuralMerge { message: String },

    #[error("Failed to render {format} content: {message}")]
    Render { format: String, message: String },

    #[error("{format} documents cannot be merged")]
    UnsupportedFormat { format: String },
}

/// Coarse error category
///
/// Callers usually react to every failure the same way (skip the document or
/// replace it whole), but the category is kept for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeErrorKind {
    Parse,
    StructuralMerge,
    Render,
    Unsupported,
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn structural(message: impl Into<String>) -> Self {
        Self::StructuralMerge {
            message: message.into(),
        }
    }

    pub fn render(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> MergeErrorKind {
        match self {
            Self::ParseError { .. } => MergeErrorKind::Parse,
            Self::StructuralMerge { .. } => MergeErrorKind::StructuralMerge,
            Self::Render { .. } => MergeErrorKind::Render,
            Self::UnsupportedFormat { .. } => MergeErrorKind::Unsupported,
        }
    }
}
