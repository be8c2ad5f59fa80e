//! In-memory item source over a static catalog

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;

use super::ItemSource;
use crate::error::SourceError;
use crate::model::Item;
use crate::model::ItemTree;

/// An item source serving a fixed catalog from memory.
///
/// Children are handed out one level at a time, the way a paged backend
/// would. Search is a case-insensitive substring match over every label;
/// a matching node is returned with its whole subtree.
///
/// # Example
///
/// ```
/// use tokenselect_lib::source::InMemorySource;
///
/// let source = InMemorySource::from_json(
///     r#"[{"id": "fruit", "label": "Fruit", "children": [{"id": "apple", "label": "Apple"}]}]"#,
/// ).unwrap();
/// assert_eq!(source.fetch_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySource {
    catalog: Vec<ItemTree>,
    latency: Option<Duration>,
    fetches: AtomicUsize,
    searches: AtomicUsize,
}

impl InMemorySource {
    /// Creates a source over the given catalog.
    pub fn new(catalog: Vec<ItemTree>) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    /// Parses a JSON array of tree-shaped items.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Delays every answer by the given duration.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of `fetch_children` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of `search_items` calls served so far.
    pub fn search_count(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    async fn wait(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn find<'a>(trees: &'a [ItemTree], id: &str) -> Option<&'a ItemTree> {
        for tree in trees {
            if tree.item.id == id {
                return Some(tree);
            }
            if let Some(found) = tree.children.as_deref().and_then(|c| Self::find(c, id)) {
                return Some(found);
            }
        }
        None
    }

    fn collect_matches(trees: &[ItemTree], needle: &str, out: &mut Vec<ItemTree>) {
        for tree in trees {
            if tree.item.label.to_lowercase().contains(needle) {
                out.push(tree.clone());
            } else if let Some(children) = &tree.children {
                Self::collect_matches(children, needle, out);
            }
        }
    }
}

#[async_trait]
impl ItemSource for InMemorySource {
    async fn fetch_children(&self, parent: Option<&str>) -> Result<Vec<Item>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.wait().await;

        let level = match parent {
            None => &self.catalog[..],
            Some(id) => {
                let node = Self::find(&self.catalog, id).ok_or_else(|| SourceError::not_found(id))?;
                node.children.as_deref().unwrap_or(&[])
            }
        };
        Ok(level.iter().map(ItemTree::to_item).collect())
    }

    async fn search_items(&self, query: &str) -> Result<Vec<ItemTree>, SourceError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.wait().await;

        let needle = query.trim().to_lowercase();
        let mut matches = Vec::new();
        Self::collect_matches(&self.catalog, &needle, &mut matches);
        Ok(matches)
    }
}
