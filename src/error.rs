//! Error types for URI parsing, serialization and path normalization.

use thiserror::Error;

/// Errors that can occur while parsing, serializing or normalizing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UriError {
    /// The input cannot be decomposed into scheme/authority/path/query/fragment.
    #[error("Malformed URI: {0}")]
    MalformedUri(String),

    /// The component combination cannot be turned into a string losslessly.
    #[error("Unrepresentable URI: {0}")]
    UnrepresentableUri(String),

    /// A relative path tried to climb above its starting directory.
    #[error("Attempt to traverse above the starting directory: {0}")]
    PathEscape(String),

    /// A precondition on an argument was violated.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl UriError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        UriError::MalformedUri(reason.into())
    }

    pub(crate) fn unrepresentable(reason: impl Into<String>) -> Self {
        UriError::UnrepresentableUri(reason.into())
    }
}
