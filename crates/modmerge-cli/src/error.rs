//! Error types for modmerge-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from modmerge-core
    #[error(transparent)]
    Core(#[from] modmerge_core::Error),

    /// Error from modmerge-meta
    #[error(transparent)]
    Meta(#[from] modmerge_meta::Error),

    /// Error from modmerge-content
    #[error(transparent)]
    Content(#[from] modmerge_content::Error),

    /// Error from modmerge-fs
    #[error(transparent)]
    Fs(#[from] modmerge_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
