//! Item source collaborator
//!
//! The engine never talks to a backend directly. Hosts supply an
//! [`ItemSource`] that answers child fetches and free-text searches.

mod memory;

pub use memory::*;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::Item;
use crate::model::ItemTree;

/// Trait for item sources.
///
/// Implementations must resolve with an empty list, not an error, when a
/// parent simply has no children.
///
/// # Example
///
/// ```ignore
/// use tokenselect_lib::source::{InMemorySource, ItemSource};
///
/// let source = InMemorySource::from_json(include_str!("catalog.json"))?;
/// let roots = source.fetch_children(None).await?;
/// let fruit = source.fetch_children(Some("fruit")).await?;
/// ```
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetches the top-level items (`None`) or the children of `parent`.
    async fn fetch_children(&self, parent: Option<&str>) -> Result<Vec<Item>, SourceError>;

    /// Searches the whole corpus. Results may carry delivered subtrees.
    async fn search_items(&self, query: &str) -> Result<Vec<ItemTree>, SourceError>;
}
