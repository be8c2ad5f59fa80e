//! Fetch coordination error types

use std::time::Duration;

use super::SourceError;

/// Errors that can occur while the loader runs a fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The source rejected the request.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The source did not answer in time.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The concurrency limiter was shut down.
    #[error("Loader closed")]
    Closed,
}

impl LoadError {
    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Source(err) => err.is_retryable(),
            Self::Timeout(_) => true,
            Self::Closed => false,
        }
    }
}
