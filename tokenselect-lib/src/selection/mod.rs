//! Selection algebra over a partially loaded tree.
//!
//! Every function here is pure: it takes a tree snapshot and a selection and
//! returns a freshly built result. Nothing is mutated in place, so a caller
//! can keep handing out the previous sets while a new one is computed.
//!
//! Only loaded children take part. A checked parent whose children have not
//! been fetched yet stays a single id until [`reconcile_on_load`] fills in
//! the children revealed later.

mod state;

pub use state::*;

use std::collections::HashSet;

use crate::model::Item;
use crate::model::Node;
use crate::model::Token;
use crate::model::TreeNode;
use crate::tree::TreeStore;

pub use crate::model::token_ids;

/// A set of node ids.
pub type IdSet = HashSet<String>;

/// Check if the node itself is in the selection.
pub fn is_checked(node: &TreeNode, selection: &IdSet) -> bool {
    selection.contains(&node.id)
}

/// Check if every node and every loaded descendant is checked.
///
/// An empty slice is vacuously fully checked.
pub fn is_fully_checked(nodes: &[Node], selection: &IdSet) -> bool {
    nodes
        .iter()
        .all(|n| is_checked(n, selection) && is_fully_checked(n.loaded_children(), selection))
}

/// Check if at least one node or loaded descendant is checked.
pub fn is_partially_checked(nodes: &[Node], selection: &IdSet) -> bool {
    nodes
        .iter()
        .any(|n| is_checked(n, selection) || is_partially_checked(n.loaded_children(), selection))
}

/// Computes the ids of parents in a mixed state.
///
/// A parent is indeterminate when it is not checked itself, at least one
/// child is checked or indeterminate, and its children are not all fully
/// checked. Children are evaluated before their parent so the state climbs
/// through any number of levels.
pub fn compute_indeterminate(nodes: &[Node], selection: &IdSet) -> IdSet {
    let mut result = IdSet::new();
    collect_indeterminate(nodes, selection, &mut result);
    result
}

fn collect_indeterminate(nodes: &[Node], selection: &IdSet, result: &mut IdSet) {
    for node in nodes {
        let children = node.loaded_children();
        if children.is_empty() {
            continue;
        }

        let mut below = IdSet::new();
        collect_indeterminate(children, selection, &mut below);

        let some_marked = children
            .iter()
            .any(|c| is_checked(c, selection) || below.contains(&c.id));
        let mixed = !is_checked(node, selection)
            && some_marked
            && !is_fully_checked(children, selection);

        result.extend(below);
        if mixed {
            result.insert(node.id.clone());
        }
    }
}

/// Checks `id` together with its loaded subtree, then marks every parent
/// whose loaded children are now all checked.
///
/// The upward pass rescans the whole tree because a deep check can complete
/// a grandparent as a side effect.
pub fn check(tree: &TreeStore, selection: &IdSet, id: &str) -> IdSet {
    let mut result = selection.clone();
    result.insert(id.to_string());

    if let Some(node) = tree.find_by_id(id) {
        result.extend(tree.collect_all_ids(node).iter().cloned());
    }

    propagate_up(tree.roots(), &mut result);
    result
}

fn propagate_up(nodes: &[Node], result: &mut IdSet) {
    for node in nodes {
        let children = node.loaded_children();
        if children.is_empty() {
            continue;
        }
        propagate_up(children, result);
        if children.iter().all(|c| result.contains(&c.id)) {
            result.insert(node.id.clone());
        }
    }
}

/// Unchecks `id`, its loaded subtree, and every ancestor that is no longer
/// fully covered.
///
/// A node survives only if it stays selected and nothing below it is
/// unselected. Ids that are not part of the current tree are dropped.
pub fn uncheck(nodes: &[Node], selection: &IdSet, id: &str) -> IdSet {
    let mut filtered = selection.clone();
    filtered.remove(id);

    let mut result = IdSet::new();
    retain_covered(nodes, &filtered, id, &mut result);
    result
}

fn retain_covered(nodes: &[Node], filtered: &IdSet, removed: &str, result: &mut IdSet) {
    for node in nodes {
        if node.id == removed {
            continue;
        }
        let children = node.loaded_children();
        retain_covered(children, filtered, removed, result);

        if is_checked(node, filtered) && !has_unselected_descendant(children, filtered) {
            result.insert(node.id.clone());
        }
    }
}

fn has_unselected_descendant(nodes: &[Node], selection: &IdSet) -> bool {
    nodes.iter().any(|n| {
        !is_checked(n, selection) || has_unselected_descendant(n.loaded_children(), selection)
    })
}

/// Select-all toggle: clears a fully checked tree, otherwise selects every
/// loaded node.
pub fn toggle_select_all(tree: &TreeStore, selection: &IdSet) -> IdSet {
    if is_fully_checked(tree.roots(), selection) {
        IdSet::new()
    } else {
        tree.all_ids()
    }
}

/// Counts selected entries without double counting.
///
/// A checked node counts once and hides its subtree; an unchecked node
/// contributes the count of its checked descendants.
pub fn count_selected(nodes: &[Node], selection: &IdSet) -> usize {
    nodes
        .iter()
        .map(|n| {
            if is_checked(n, selection) {
                1
            } else {
                count_selected(n.loaded_children(), selection)
            }
        })
        .sum()
}

/// Projects the selection to tokens in tree order, by the same rule as
/// [`count_selected`].
pub fn project_tokens(nodes: &[Node], selection: &IdSet) -> Vec<Token> {
    let mut tokens = Vec::new();
    push_tokens(nodes, selection, &mut tokens);
    tokens
}

fn push_tokens(nodes: &[Node], selection: &IdSet, tokens: &mut Vec<Token>) {
    for node in nodes {
        if is_checked(node, selection) {
            tokens.push(node.to_token());
        } else {
            push_tokens(node.loaded_children(), selection, tokens);
        }
    }
}

/// Carries a checked parent's state onto children fetched after it was
/// checked. Leaves the selection untouched when the parent is not checked.
pub fn reconcile_on_load(selection: &IdSet, children: &[Item], parent_id: &str) -> IdSet {
    if !selection.contains(parent_id) {
        return selection.clone();
    }
    let mut result = selection.clone();
    result.extend(children.iter().map(|c| c.id.clone()));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> IdSet {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn tree() -> TreeStore {
        TreeStore::from_nodes(vec![TreeNode::branch(
            "A",
            "A",
            vec![TreeNode::leaf("A1", "A1"), TreeNode::leaf("A2", "A2")],
        )])
    }

    #[test]
    fn test_empty_slice_is_fully_checked() {
        assert!(is_fully_checked(&[], &IdSet::new()));
        assert!(!is_partially_checked(&[], &IdSet::new()));
    }

    #[test]
    fn test_check_leaf_marks_parent_indeterminate() {
        let tree = tree();
        let selected = check(&tree, &IdSet::new(), "A1");

        assert_eq!(selected, ids(&["A1"]));
        assert_eq!(compute_indeterminate(tree.roots(), &selected), ids(&["A"]));
    }

    #[test]
    fn test_check_last_child_propagates_up() {
        let tree = tree();
        let selected = check(&tree, &ids(&["A1"]), "A2");

        assert_eq!(selected, ids(&["A", "A1", "A2"]));
        assert!(compute_indeterminate(tree.roots(), &selected).is_empty());
    }

    #[test]
    fn test_uncheck_child_clears_parent() {
        let tree = tree();
        let selected = uncheck(tree.roots(), &ids(&["A", "A1", "A2"]), "A1");

        assert_eq!(selected, ids(&["A2"]));
        assert_eq!(compute_indeterminate(tree.roots(), &selected), ids(&["A"]));
    }

    #[test]
    fn test_uncheck_parent_clears_subtree() {
        let tree = tree();
        let selected = uncheck(tree.roots(), &ids(&["A", "A1", "A2"]), "A");
        assert!(selected.is_empty());
    }

    #[test]
    fn test_reconcile_on_load() {
        let children = vec![Item::leaf("c1", "C1"), Item::leaf("c2", "C2")];

        assert_eq!(
            reconcile_on_load(&ids(&["p"]), &children, "p"),
            ids(&["p", "c1", "c2"])
        );
        assert_eq!(reconcile_on_load(&ids(&["x"]), &children, "p"), ids(&["x"]));
    }

    #[test]
    fn test_count_and_tokens_collapse_checked_parent() {
        let tree = tree();
        let selected = ids(&["A", "A1", "A2"]);

        assert_eq!(count_selected(tree.roots(), &selected), 1);
        let tokens = project_tokens(tree.roots(), &selected);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, "A");
    }
}
