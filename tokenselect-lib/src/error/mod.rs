//! Error types

mod load;
mod source;

pub use load::*;
pub use source::*;

/// Top-level error for controller operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fetching from the item source failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A JSON catalog could not be parsed.
    #[error("Catalog parse error: {0}")]
    Catalog(#[from] serde_json::Error),
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        Self::Load(LoadError::Source(err))
    }
}

impl Error {
    /// Returns `true` if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Load(err) => err.is_retryable(),
            Self::Catalog(_) => false,
        }
    }
}
