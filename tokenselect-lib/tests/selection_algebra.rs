//! Tests for the selection algebra over loaded and partially loaded trees.

use std::collections::HashSet;

use tokenselect_lib::TreeNode;
use tokenselect_lib::selection::{
    IdSet, check, compute_indeterminate, count_selected, is_fully_checked, is_partially_checked,
    project_tokens, reconcile_on_load, toggle_select_all, uncheck,
};
use tokenselect_lib::tree::TreeStore;
use tokenselect_lib::Item;

fn ids(list: &[&str]) -> IdSet {
    list.iter().map(|s| s.to_string()).collect()
}

/// A(A1, A2)
fn flat_tree() -> TreeStore {
    TreeStore::from_nodes(vec![TreeNode::branch(
        "A",
        "A",
        vec![TreeNode::leaf("A1", "A1"), TreeNode::leaf("A2", "A2")],
    )])
}

/// R(P(L1, L2), Q), S(unloaded), T
fn deep_tree() -> TreeStore {
    TreeStore::from_nodes(vec![
        TreeNode::branch(
            "R",
            "Root",
            vec![
                TreeNode::branch(
                    "P",
                    "Parent",
                    vec![TreeNode::leaf("L1", "Leaf 1"), TreeNode::leaf("L2", "Leaf 2")],
                ),
                TreeNode::leaf("Q", "Q"),
            ],
        ),
        TreeNode::parent("S", "Unloaded"),
        TreeNode::leaf("T", "T"),
    ])
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_check_one_child_then_the_other() {
    let tree = flat_tree();

    let first = check(&tree, &IdSet::new(), "A1");
    assert_eq!(first, ids(&["A1"]));
    assert_eq!(compute_indeterminate(tree.roots(), &first), ids(&["A"]));

    let second = check(&tree, &first, "A2");
    assert_eq!(second, ids(&["A1", "A2", "A"]));
    assert!(compute_indeterminate(tree.roots(), &second).is_empty());
}

#[test]
fn test_uncheck_child_of_checked_parent() {
    let tree = flat_tree();
    let selected = uncheck(tree.roots(), &ids(&["A", "A1", "A2"]), "A1");

    assert_eq!(selected, ids(&["A2"]));
    assert_eq!(compute_indeterminate(tree.roots(), &selected), ids(&["A"]));
}

#[test]
fn test_count_collapses_checked_parent() {
    let tree = TreeStore::from_nodes(vec![TreeNode::branch(
        "P",
        "P",
        vec![
            TreeNode::leaf("a", "a"),
            TreeNode::leaf("b", "b"),
            TreeNode::leaf("c", "c"),
        ],
    )]);

    let one_leaf = ids(&["b"]);
    assert_eq!(count_selected(tree.roots(), &one_leaf), 1);

    let parent = check(&tree, &one_leaf, "P");
    assert_eq!(parent, ids(&["P", "a", "b", "c"]));
    assert_eq!(count_selected(tree.roots(), &parent), 1);
}

// =============================================================================
// Propagation
// =============================================================================

#[test]
fn test_check_fills_loaded_subtree() {
    let tree = deep_tree();
    let selected = check(&tree, &IdSet::new(), "R");
    assert_eq!(selected, ids(&["R", "P", "L1", "L2", "Q"]));
}

#[test]
fn test_check_unloaded_parent_checks_only_itself() {
    let tree = deep_tree();
    let selected = check(&tree, &IdSet::new(), "S");
    assert_eq!(selected, ids(&["S"]));
}

#[test]
fn test_upward_propagation_through_two_levels() {
    let tree = deep_tree();

    let mut selected = IdSet::new();
    for id in ["L1", "L2", "Q"] {
        selected = check(&tree, &selected, id);
    }

    assert!(selected.contains("P"));
    assert!(selected.contains("R"));
    assert!(compute_indeterminate(tree.roots(), &selected).is_empty());
}

#[test]
fn test_indeterminate_climbs_levels() {
    let tree = deep_tree();

    let selected = check(&tree, &IdSet::new(), "L1");
    assert_eq!(compute_indeterminate(tree.roots(), &selected), ids(&["P", "R"]));

    let selected = check(&tree, &selected, "L2");
    assert!(selected.contains("P"));
    assert_eq!(compute_indeterminate(tree.roots(), &selected), ids(&["R"]));
}

#[test]
fn test_uncheck_deep_leaf_clears_every_ancestor() {
    let tree = deep_tree();
    let full = check(&tree, &IdSet::new(), "R");

    let selected = uncheck(tree.roots(), &full, "L1");
    assert_eq!(selected, ids(&["L2", "Q"]));
    assert_eq!(compute_indeterminate(tree.roots(), &selected), ids(&["P", "R"]));
}

#[test]
fn test_uncheck_drops_ids_outside_tree() {
    let tree = flat_tree();
    let selected = uncheck(tree.roots(), &ids(&["A2", "elsewhere"]), "A1");
    assert_eq!(selected, ids(&["A2"]));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_check_is_idempotent() {
    let tree = deep_tree();
    for id in ["R", "P", "L1", "Q", "S", "T"] {
        let once = check(&tree, &ids(&["L2"]), id);
        let twice = check(&tree, &once, id);
        assert_eq!(once, twice, "check({id}) not idempotent");
    }
}

#[test]
fn test_uncheck_is_idempotent() {
    let tree = deep_tree();
    let full = toggle_select_all(&tree, &IdSet::new());
    for id in ["R", "P", "L1", "Q", "S", "T"] {
        let once = uncheck(tree.roots(), &full, id);
        let twice = uncheck(tree.roots(), &once, id);
        assert_eq!(once, twice, "uncheck({id}) not idempotent");
    }
}

#[test]
fn test_checked_and_indeterminate_are_disjoint() {
    let tree = deep_tree();
    let selections = [
        IdSet::new(),
        ids(&["L1"]),
        ids(&["L1", "Q"]),
        ids(&["P", "L1", "L2"]),
        ids(&["R"]),
        ids(&["S", "T"]),
        toggle_select_all(&tree, &IdSet::new()),
    ];

    for selected in &selections {
        let indeterminate = compute_indeterminate(tree.roots(), selected);
        assert!(indeterminate.is_disjoint(selected), "overlap for {selected:?}");
    }
}

#[test]
fn test_indeterminate_only_holds_nodes_with_children() {
    let tree = deep_tree();
    let parents: HashSet<&str> = ["R", "P"].into_iter().collect();

    for id in ["L1", "L2", "Q", "S", "T"] {
        let selected = check(&tree, &IdSet::new(), id);
        for marked in compute_indeterminate(tree.roots(), &selected) {
            assert!(parents.contains(marked.as_str()), "{marked} has no children");
        }
    }
}

#[test]
fn test_select_all_round_trip() {
    let tree = deep_tree();

    let all = toggle_select_all(&tree, &IdSet::new());
    assert_eq!(all, ids(&["R", "P", "L1", "L2", "Q", "S", "T"]));
    assert!(is_fully_checked(tree.roots(), &all));

    assert!(toggle_select_all(&tree, &all).is_empty());
}

#[test]
fn test_select_all_from_partial_selects_everything() {
    let tree = deep_tree();
    let partial = ids(&["L1"]);

    assert!(is_partially_checked(tree.roots(), &partial));
    assert!(!is_fully_checked(tree.roots(), &partial));
    assert_eq!(toggle_select_all(&tree, &partial).len(), 7);
}

#[test]
fn test_reconcile_on_load() {
    let children = vec![Item::leaf("c1", "C1"), Item::leaf("c2", "C2")];

    assert_eq!(
        reconcile_on_load(&ids(&["p"]), &children, "p"),
        ids(&["p", "c1", "c2"])
    );

    let unrelated = ids(&["q"]);
    assert_eq!(reconcile_on_load(&unrelated, &children, "p"), unrelated);
}

#[test]
fn test_loaded_empty_parent_is_not_auto_checked() {
    let tree = TreeStore::from_nodes(vec![
        TreeNode::branch("E", "Empty", vec![]),
        TreeNode::leaf("x", "X"),
    ]);

    let selected = check(&tree, &IdSet::new(), "x");
    assert_eq!(selected, ids(&["x"]));
}

#[test]
fn test_tokens_follow_tree_order() {
    let tree = deep_tree();
    let selected = ids(&["T", "L2", "Q"]);

    let tokens = project_tokens(tree.roots(), &selected);
    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["L2", "Q", "T"]);
    assert_eq!(count_selected(tree.roots(), &selected), 3);
}
