//! Tri-state checkbox values derived from a selection.

use super::IdSet;
use super::is_fully_checked;
use super::is_partially_checked;
use crate::model::Node;

/// Display state of a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    Indeterminate,
    Checked,
}

impl CheckState {
    pub fn is_checked(self) -> bool {
        self == Self::Checked
    }

    pub fn is_indeterminate(self) -> bool {
        self == Self::Indeterminate
    }
}

/// State of the "select all" header checkbox for the given roots.
pub fn check_all_state(nodes: &[Node], selection: &IdSet) -> CheckState {
    if is_fully_checked(nodes, selection) {
        CheckState::Checked
    } else if is_partially_checked(nodes, selection) {
        CheckState::Indeterminate
    } else {
        CheckState::Unchecked
    }
}

/// State of a single node's checkbox.
///
/// Checked wins over indeterminate; the two sets never overlap when the
/// indeterminate set comes from `compute_indeterminate`.
pub fn node_state(id: &str, selection: &IdSet, indeterminate: &IdSet) -> CheckState {
    if selection.contains(id) {
        CheckState::Checked
    } else if indeterminate.contains(id) {
        CheckState::Indeterminate
    } else {
        CheckState::Unchecked
    }
}
