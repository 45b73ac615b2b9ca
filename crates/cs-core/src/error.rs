//! Error types for comment-section

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for comment-section
#[derive(Debug, Error)]
pub enum CommentSectionError {
    /// Position does not name an existing comment
    #[error("Comment index {index} out of range (store has {len} comments)")]
    OutOfRange { index: usize, len: usize },

    /// Comment not found by identifier
    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    /// Text rejected by a validator
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CommentSectionError>,
    },
}

impl CommentSectionError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CommentSectionError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check whether this error (or the error it wraps) is an index error
    pub fn is_out_of_range(&self) -> bool {
        match self {
            CommentSectionError::OutOfRange { .. } => true,
            CommentSectionError::WithContext { source, .. } => source.is_out_of_range(),
            _ => false,
        }
    }
}

impl From<toml::de::Error> for CommentSectionError {
    fn from(err: toml::de::Error) -> Self {
        CommentSectionError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for CommentSectionError {
    fn from(err: toml::ser::Error) -> Self {
        CommentSectionError::Toml(err.to_string())
    }
}

/// Result type alias for comment-section
pub type Result<T> = std::result::Result<T, CommentSectionError>;
