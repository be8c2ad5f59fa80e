//! Category-first presentation of search results.

use crate::model::TreeNode;

/// Search results split into categories and plain items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    /// Entries that are parents, in input order.
    pub parents: Vec<T>,
    /// Everything else, in input order.
    pub leaves: Vec<T>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            parents: Vec::new(),
            leaves: Vec::new(),
        }
    }
}

impl<T> Partition<T> {
    pub fn len(&self) -> usize {
        self.parents.len() + self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty() && self.leaves.is_empty()
    }
}

/// Splits a flat sequence into parents and leaves, preserving order.
pub fn partition<T: AsRef<TreeNode> + Clone>(items: &[T]) -> Partition<T> {
    let mut result = Partition::default();
    for item in items {
        if item.as_ref().is_parent() {
            result.parents.push(item.clone());
        } else {
            result.leaves.push(item.clone());
        }
    }
    result
}
