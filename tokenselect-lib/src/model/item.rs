//! Items as delivered by an item source

use serde::Deserialize;
use serde::Serialize;

/// A selectable unit as returned by [`ItemSource`](crate::source::ItemSource).
///
/// `is_parent` only says children *may* exist; they are fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier across the whole tree.
    #[serde(alias = "value")]
    pub id: String,
    /// Display label.
    pub label: String,
    /// Whether this item can have children.
    #[serde(default)]
    pub is_parent: bool,
    /// Optional badge count shown next to the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<u32>,
}

impl Item {
    /// Creates a leaf item.
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            is_parent: false,
            counter: None,
        }
    }

    /// Creates a parent item whose children are not loaded yet.
    pub fn parent(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            is_parent: true,
            counter: None,
        }
    }

    /// Sets the counter badge.
    pub fn with_counter(mut self, counter: u32) -> Self {
        self.counter = Some(counter);
        self
    }
}

/// An item together with an optional, already materialized subtree.
///
/// Search results arrive in this shape. `children: None` means the subtree
/// was not delivered and must be fetched lazily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTree {
    #[serde(flatten)]
    pub item: Item,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ItemTree>>,
}

impl ItemTree {
    /// Wraps an item without a delivered subtree.
    pub fn new(item: Item) -> Self {
        Self {
            item,
            children: None,
        }
    }

    /// Wraps an item with a delivered list of children.
    pub fn with_children(item: Item, children: Vec<ItemTree>) -> Self {
        Self {
            item,
            children: Some(children),
        }
    }

    /// Returns the item with `is_parent` reflecting a delivered subtree.
    pub fn to_item(&self) -> Item {
        Item {
            is_parent: self.item.is_parent || self.children.is_some(),
            ..self.item.clone()
        }
    }
}

impl From<Item> for ItemTree {
    fn from(item: Item) -> Self {
        Self::new(item)
    }
}
