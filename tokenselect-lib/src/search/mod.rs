//! Relevance ranking of search results.

mod partition;
mod relevance;

pub use partition::*;
pub use relevance::*;
