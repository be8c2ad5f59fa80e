//! What the dropdown lists.

use crate::model::Node;
use crate::search::Partition;
use crate::search::Ranked;

/// Content of the dropdown list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Browsing: the tree as loaded so far.
    Tree(Vec<Node>),
    /// Searching: ranked matches, categories before items.
    Search {
        query: String,
        results: Partition<Ranked>,
    },
}

impl View {
    /// Number of top-level rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Tree(nodes) => nodes.len(),
            Self::Search { results, .. } => results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-level nodes in display order.
    pub fn nodes(&self) -> Vec<Node> {
        match self {
            Self::Tree(nodes) => nodes.clone(),
            Self::Search { results, .. } => results
                .parents
                .iter()
                .chain(&results.leaves)
                .map(|r| r.node.clone())
                .collect(),
        }
    }
}
