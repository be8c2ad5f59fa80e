//! Item source error types

/// Errors reported by an [`ItemSource`](crate::source::ItemSource).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The backing service could not be reached.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The requested parent does not exist in the source.
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Any other failure reported by the source.
    #[error("Source error: {0}")]
    Other(String),
}

impl SourceError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a not found error for the given id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Creates a generic source error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
