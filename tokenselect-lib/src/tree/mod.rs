//! Tree traversal and copy-on-write merging
//!
//! Free functions work on a bare slice of roots. [`TreeStore`] wraps them
//! with a snapshot generation and a cache for [`collect_all_ids`].

mod store;

pub use store::*;

use std::collections::HashSet;
use std::sync::Arc;

use crate::model::Node;

/// Finds a node by id, depth-first pre-order. First match wins.
pub fn find_by_id<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_by_id(node.loaded_children(), id) {
            return Some(found);
        }
    }
    None
}

/// Finds a node by label, depth-first pre-order. First match wins.
pub fn find_by_label<'a>(nodes: &'a [Node], label: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.label == label {
            return Some(node);
        }
        if let Some(found) = find_by_label(node.loaded_children(), label) {
            return Some(found);
        }
    }
    None
}

/// Collects the node's own id and the ids of all loaded descendants.
pub fn collect_all_ids(node: &Node) -> HashSet<String> {
    let mut ids = HashSet::new();
    extend_ids(std::slice::from_ref(node), &mut ids);
    ids
}

/// Collects the ids of every node in the given forest.
pub fn collect_forest_ids(nodes: &[Node]) -> HashSet<String> {
    let mut ids = HashSet::new();
    extend_ids(nodes, &mut ids);
    ids
}

fn extend_ids(nodes: &[Node], ids: &mut HashSet<String>) {
    for node in nodes {
        ids.insert(node.id.clone());
        extend_ids(node.loaded_children(), ids);
    }
}

/// Returns a new forest where the first node matching `id` carries `children`.
///
/// The matched node becomes a parent. Subtrees off the path to it are shared
/// with the input. If `id` is absent the input is returned unchanged.
pub fn merge_children(nodes: &[Node], id: &str, children: Vec<Node>) -> Vec<Node> {
    match merge_into(nodes, id, children) {
        Ok(merged) => merged,
        Err(_) => nodes.to_vec(),
    }
}

/// Rebuilds `nodes` with the merge applied, or hands `children` back when
/// `id` is not in this forest so the caller can keep searching.
fn merge_into(nodes: &[Node], id: &str, children: Vec<Node>) -> Result<Vec<Node>, Vec<Node>> {
    let mut children = children;
    for (index, node) in nodes.iter().enumerate() {
        let replacement = if node.id == id {
            Arc::new(node.with_children(children))
        } else {
            match merge_into(node.loaded_children(), id, children) {
                Ok(merged) => Arc::new(node.with_children(merged)),
                Err(returned) => {
                    children = returned;
                    continue;
                }
            }
        };

        let mut merged = nodes.to_vec();
        merged[index] = replacement;
        return Ok(merged);
    }
    Err(children)
}

/// Visits every loaded node depth-first pre-order, with its depth.
pub fn walk<'a>(nodes: &'a [Node], visit: &mut impl FnMut(&'a Node, usize)) {
    fn go<'a>(nodes: &'a [Node], depth: usize, visit: &mut impl FnMut(&'a Node, usize)) {
        for node in nodes {
            visit(node, depth);
            go(node.loaded_children(), depth + 1, visit);
        }
    }
    go(nodes, 0, visit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeNode;

    fn sample() -> Vec<Node> {
        vec![
            Arc::new(TreeNode::branch(
                "a",
                "A",
                vec![
                    TreeNode::leaf("a1", "A1"),
                    TreeNode::branch("a2", "A2", vec![TreeNode::leaf("a2x", "Shared")]),
                ],
            )),
            Arc::new(TreeNode::parent("b", "B")),
            Arc::new(TreeNode::leaf("c", "Shared")),
        ]
    }

    #[test]
    fn test_find_by_id_descends() {
        let tree = sample();
        assert_eq!(find_by_id(&tree, "a2x").map(|n| n.label.as_str()), Some("Shared"));
        assert!(find_by_id(&tree, "missing").is_none());
    }

    #[test]
    fn test_find_by_label_pre_order_first_match() {
        let tree = sample();
        assert_eq!(find_by_label(&tree, "Shared").map(|n| n.id.as_str()), Some("a2x"));
    }

    #[test]
    fn test_collect_all_ids() {
        let tree = sample();
        let ids = collect_all_ids(&tree[0]);
        let expected: HashSet<String> = ["a", "a1", "a2", "a2x"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_merge_children_shares_untouched_subtrees() {
        let tree = sample();
        let merged = merge_children(
            &tree,
            "b",
            vec![Arc::new(TreeNode::leaf("b1", "B1"))],
        );

        assert!(Arc::ptr_eq(&tree[0], &merged[0]));
        assert!(Arc::ptr_eq(&tree[2], &merged[2]));
        assert!(!Arc::ptr_eq(&tree[1], &merged[1]));
        assert_eq!(merged[1].loaded_children()[0].id, "b1");
        // input untouched
        assert!(tree[1].needs_fetch());
    }

    #[test]
    fn test_merge_children_nested_rebuilds_path() {
        let tree = sample();
        let merged = merge_children(&tree, "a1", vec![]);

        let a = &merged[0];
        assert!(!Arc::ptr_eq(&tree[0], a));
        assert!(Arc::ptr_eq(&tree[0].loaded_children()[1], &a.loaded_children()[1]));
        let a1 = &a.loaded_children()[0];
        assert!(a1.is_parent());
        assert_eq!(a1.children(), Some(&[][..]));
    }

    #[test]
    fn test_merge_children_missing_id_is_noop() {
        let tree = sample();
        let merged = merge_children(&tree, "zzz", vec![Arc::new(TreeNode::leaf("z", "Z"))]);
        assert_eq!(merged.len(), tree.len());
        for (before, after) in tree.iter().zip(&merged) {
            assert!(Arc::ptr_eq(before, after));
        }
    }

    #[test]
    fn test_walk_depths() {
        let tree = sample();
        let mut seen = Vec::new();
        walk(&tree, &mut |node, depth| seen.push((node.id.clone(), depth)));
        assert_eq!(
            seen,
            vec![
                ("a".to_string(), 0),
                ("a1".to_string(), 1),
                ("a2".to_string(), 1),
                ("a2x".to_string(), 2),
                ("b".to_string(), 0),
                ("c".to_string(), 0),
            ]
        );
    }
}
