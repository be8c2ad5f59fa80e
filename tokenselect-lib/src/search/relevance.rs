//! Position-based relevance scoring.

use std::cmp::Reverse;

use crate::model::Node;
use crate::model::TreeNode;

/// Score for a label that starts with the query.
pub const PREFIX: u8 = 3;
/// Score for a match strictly inside the label.
pub const INTERIOR: u8 = 2;
/// Score for a match that ends exactly at the end of the label.
pub const SUFFIX: u8 = 1;

/// A node that matched a query, with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked {
    /// The matched node, children included as-is.
    pub node: Node,
    /// Match score (higher is better, never 0).
    pub relevance: u8,
}

impl AsRef<TreeNode> for Ranked {
    fn as_ref(&self) -> &TreeNode {
        &self.node
    }
}

/// Scores `label` against `query` by where the first case-insensitive
/// occurrence of the query sits.
///
/// Positions are counted in chars. An empty query matches at index 0 and
/// therefore scores as a prefix match.
///
/// # Example
///
/// ```
/// use tokenselect_lib::search::relevance;
///
/// assert_eq!(relevance("Apple", "apple"), 3);
/// assert_eq!(relevance("Pineapple", "apple"), 1);
/// assert_eq!(relevance("Grape", "apple"), 0);
/// ```
pub fn relevance(label: &str, query: &str) -> u8 {
    let label = label.to_lowercase();
    let query = query.to_lowercase();

    let Some(byte_index) = label.find(&query) else {
        return 0;
    };

    let index = label[..byte_index].chars().count();
    let tail_start = label.chars().count() - query.chars().count();

    if index == 0 {
        PREFIX
    } else if index < tail_start {
        INTERIOR
    } else {
        SUFFIX
    }
}

/// Ranks the top-level nodes by relevance to `query`.
///
/// The query is trimmed first. Only each node's own label is scored; its
/// children are carried along untouched so the result keeps the tree shape.
/// Non-matching nodes are dropped and the rest are sorted by descending
/// score, keeping input order between equal scores.
pub fn rank(nodes: &[Node], query: &str) -> Vec<Ranked> {
    let query = query.trim();

    let mut ranked: Vec<Ranked> = nodes
        .iter()
        .map(|node| Ranked {
            node: node.clone(),
            relevance: relevance(&node.label, query),
        })
        .filter(|r| r.relevance > 0)
        .collect();

    ranked.sort_by_key(|r| Reverse(r.relevance));
    ranked
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn leaves(labels: &[&str]) -> Vec<Node> {
        labels
            .iter()
            .map(|l| Arc::new(TreeNode::leaf(l.to_lowercase(), *l)))
            .collect()
    }

    #[test]
    fn test_relevance_positions() {
        assert_eq!(relevance("Apple pie", "apple"), PREFIX);
        assert_eq!(relevance("Green apples", "apple"), INTERIOR);
        assert_eq!(relevance("Pineapple", "apple"), SUFFIX);
        assert_eq!(relevance("Pear", "apple"), 0);
    }

    #[test]
    fn test_relevance_is_case_insensitive() {
        assert_eq!(relevance("APPLE", "ApPlE"), PREFIX);
    }

    #[test]
    fn test_relevance_counts_chars_not_bytes() {
        assert_eq!(relevance("Яблоко", "локо"), SUFFIX);
        assert_eq!(relevance("Зелёное яблоко", "яблок"), INTERIOR);
    }

    #[test]
    fn test_rank_orders_and_filters() {
        let nodes = leaves(&["Pineapple", "Grape", "Apple"]);
        let ranked = rank(&nodes, "apple");

        let labels: Vec<(&str, u8)> = ranked
            .iter()
            .map(|r| (r.node.label.as_str(), r.relevance))
            .collect();
        assert_eq!(labels, vec![("Apple", 3), ("Pineapple", 1)]);
    }

    #[test]
    fn test_rank_is_stable_for_equal_scores() {
        let nodes = leaves(&["Apricot", "Apple", "Avocado"]);
        let ranked = rank(&nodes, "a");
        let labels: Vec<&str> = ranked.iter().map(|r| r.node.label.as_str()).collect();
        assert_eq!(labels, vec!["Apricot", "Apple", "Avocado"]);
    }

    #[test]
    fn test_rank_empty_query_keeps_everything_as_prefix() {
        let nodes = leaves(&["B", "A"]);
        let ranked = rank(&nodes, "   ");
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.relevance == PREFIX));
        assert_eq!(ranked[0].node.label, "B");
    }

    #[test]
    fn test_rank_keeps_children_unscored() {
        let nodes = vec![Arc::new(TreeNode::branch(
            "fruit",
            "Apple varieties",
            vec![TreeNode::leaf("gs", "Granny Smith")],
        ))];
        let ranked = rank(&nodes, "apple");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].node.loaded_children()[0].label, "Granny Smith");
    }
}
