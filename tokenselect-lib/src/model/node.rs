//! Tree nodes

use std::sync::Arc;

use super::Item;
use super::ItemTree;
use super::Token;

/// Shared handle to a tree node.
///
/// Snapshots share untouched subtrees, so a merge only rebuilds the path
/// from the root to the modified node.
pub type Node = Arc<TreeNode>;

/// Whether a node is a leaf or a (possibly unloaded) parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Never has children.
    Leaf,
    /// May have children. `None` = not fetched yet, `Some(vec![])` = fetched, empty.
    Parent { children: Option<Vec<Node>> },
}

/// A node in the item tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub counter: Option<u32>,
    pub kind: NodeKind,
}

impl TreeNode {
    /// Create a leaf node.
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            counter: None,
            kind: NodeKind::Leaf,
        }
    }

    /// Create a parent node whose children have not been fetched.
    pub fn parent(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            counter: None,
            kind: NodeKind::Parent { children: None },
        }
    }

    /// Create a parent node with loaded children.
    pub fn branch(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            counter: None,
            kind: NodeKind::Parent {
                children: Some(children.into_iter().map(Arc::new).collect()),
            },
        }
    }

    /// Set the counter badge.
    pub fn with_counter(mut self, counter: u32) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Returns a copy of this node with its children replaced.
    ///
    /// The result is always a parent, even if `self` was a leaf.
    pub fn with_children(&self, children: Vec<Node>) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            counter: self.counter,
            kind: NodeKind::Parent {
                children: Some(children),
            },
        }
    }

    pub fn is_parent(&self) -> bool {
        matches!(self.kind, NodeKind::Parent { .. })
    }

    /// Loaded children, or `None` for leaves and unfetched parents.
    pub fn children(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Parent {
                children: Some(children),
            } => Some(children),
            _ => None,
        }
    }

    /// Loaded children, empty when there are none.
    pub fn loaded_children(&self) -> &[Node] {
        self.children().unwrap_or(&[])
    }

    /// Check if this node has at least one loaded child.
    pub fn has_children(&self) -> bool {
        !self.loaded_children().is_empty()
    }

    /// Check if this is a parent whose children still have to be fetched.
    pub fn needs_fetch(&self) -> bool {
        matches!(self.kind, NodeKind::Parent { children: None })
    }

    /// Project this node back to its wire item.
    pub fn to_item(&self) -> Item {
        Item {
            id: self.id.clone(),
            label: self.label.clone(),
            is_parent: self.is_parent(),
            counter: self.counter,
        }
    }

    /// Project this node to a selection token.
    pub fn to_token(&self) -> Token {
        Token {
            value: self.id.clone(),
            label: self.label.clone(),
            is_parent: self.is_parent().then_some(true),
            counter: self.counter,
        }
    }
}

impl AsRef<TreeNode> for TreeNode {
    fn as_ref(&self) -> &TreeNode {
        self
    }
}

impl From<Item> for TreeNode {
    fn from(item: Item) -> Self {
        let kind = if item.is_parent {
            NodeKind::Parent { children: None }
        } else {
            NodeKind::Leaf
        };
        Self {
            id: item.id,
            label: item.label,
            counter: item.counter,
            kind,
        }
    }
}

impl From<ItemTree> for TreeNode {
    fn from(tree: ItemTree) -> Self {
        let ItemTree { item, children } = tree;
        match children {
            Some(children) => Self {
                id: item.id,
                label: item.label,
                counter: item.counter,
                kind: NodeKind::Parent {
                    children: Some(
                        children
                            .into_iter()
                            .map(|c| Arc::new(TreeNode::from(c)))
                            .collect(),
                    ),
                },
            },
            None => TreeNode::from(item),
        }
    }
}

/// Converts a list of items into shared nodes, preserving order.
pub fn nodes_from_items(items: impl IntoIterator<Item = Item>) -> Vec<Node> {
    items.into_iter().map(|i| Arc::new(TreeNode::from(i))).collect()
}

/// Converts tree-shaped items into shared nodes, preserving order.
pub fn nodes_from_trees(trees: impl IntoIterator<Item = ItemTree>) -> Vec<Node> {
    trees.into_iter().map(|t| Arc::new(TreeNode::from(t))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_and_empty_parents_differ() {
        let unloaded = TreeNode::parent("a", "A");
        let empty = TreeNode::branch("a", "A", vec![]);

        assert!(unloaded.needs_fetch());
        assert!(!empty.needs_fetch());
        assert_eq!(unloaded.children(), None);
        assert_eq!(empty.children(), Some(&[][..]));
        assert!(!empty.has_children());
    }

    #[test]
    fn test_item_tree_conversion() {
        let tree = ItemTree::with_children(
            Item::leaf("fruit", "Fruit"),
            vec![ItemTree::new(Item::leaf("apple", "Apple"))],
        );
        let node = TreeNode::from(tree);

        assert!(node.is_parent());
        assert_eq!(node.loaded_children().len(), 1);
        assert_eq!(node.loaded_children()[0].id, "apple");
    }

    #[test]
    fn test_token_projection() {
        let node = TreeNode::parent("cat", "Category").with_counter(7);
        let token = node.to_token();

        assert_eq!(token.value, "cat");
        assert_eq!(token.is_parent, Some(true));
        assert_eq!(token.counter, Some(7));
        assert_eq!(TreeNode::leaf("x", "X").to_token().is_parent, None);
    }
}
