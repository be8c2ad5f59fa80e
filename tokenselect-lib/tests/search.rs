use std::sync::Arc;

use tokenselect_lib::search::{partition, rank, relevance};
use tokenselect_lib::{Node, TreeNode};

fn leaves(labels: &[&str]) -> Vec<Node> {
    labels
        .iter()
        .map(|l| Arc::new(TreeNode::leaf(l.to_lowercase(), *l)))
        .collect()
}

#[test]
fn test_apple_ranking() {
    let nodes = leaves(&["Apple", "Pineapple", "Grape"]);
    let ranked = rank(&nodes, "apple");

    let result: Vec<(&str, u8)> = ranked
        .iter()
        .map(|r| (r.node.label.as_str(), r.relevance))
        .collect();
    assert_eq!(result, vec![("Apple", 3), ("Pineapple", 1)]);
}

#[test]
fn test_interior_beats_suffix() {
    let nodes = leaves(&["Pineapple", "Crab apple tree", "Apple"]);
    let ranked = rank(&nodes, "APPLE");

    let labels: Vec<&str> = ranked.iter().map(|r| r.node.label.as_str()).collect();
    assert_eq!(labels, vec!["Apple", "Crab apple tree", "Pineapple"]);
}

#[test]
fn test_query_is_trimmed() {
    assert_eq!(rank(&leaves(&["Apple"]), "  apple  ").len(), 1);
}

#[test]
fn test_label_equal_to_query() {
    assert_eq!(relevance("kale", "Kale"), 3);
}

#[test]
fn test_query_longer_than_label() {
    assert_eq!(relevance("Kale", "Kalevala"), 0);
}

#[test]
fn test_ranked_results_partition_categories_first() {
    let nodes: Vec<Node> = vec![
        Arc::new(TreeNode::leaf("apple", "Apple")),
        Arc::new(TreeNode::parent("apples", "Apples (all)")),
        Arc::new(TreeNode::leaf("crab", "Crab apple")),
        Arc::new(TreeNode::branch(
            "green",
            "Apple greens",
            vec![TreeNode::leaf("gs", "Granny Smith")],
        )),
    ];

    let split = partition(&rank(&nodes, "apple"));

    let parents: Vec<&str> = split.parents.iter().map(|r| r.node.id.as_str()).collect();
    let leaves: Vec<&str> = split.leaves.iter().map(|r| r.node.id.as_str()).collect();
    assert_eq!(parents, vec!["apples", "green"]);
    assert_eq!(leaves, vec!["apple", "crab"]);
}
