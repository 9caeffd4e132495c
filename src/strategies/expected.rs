//! Expected-value backup.
//!
//! Committing to a column partly commits to the prospects of the columns
//! beside it, so instead of taking the best child outright, each child's
//! value is first blended with the values of its left and right neighbour
//! actions among the same siblings. The extremum is then taken over these
//! interpolated values.

use super::super::interface::*;
use super::super::tree::{GameTree, NodeId};

/// Share of a child's own value in its interpolated value.
pub const OWN_WEIGHT: Value = 0.6;
/// Share of each neighbour when both neighbours were explored.
pub const SIDE_WEIGHT: Value = 0.2;
/// Share of the neighbour when only one was explored.
pub const LONE_SIDE_WEIGHT: Value = 0.4;

/// Blend `own` with the values of the neighbouring actions.
pub fn blend(own: Value, left: Option<Value>, right: Option<Value>) -> Value {
    match (left, right) {
        (Some(l), Some(r)) => OWN_WEIGHT * own + SIDE_WEIGHT * l + SIDE_WEIGHT * r,
        (Some(side), None) | (None, Some(side)) => OWN_WEIGHT * own + LONE_SIDE_WEIGHT * side,
        (None, None) => own,
    }
}

/// The interpolated value of `child`, a child of `parent`, or `None` if the
/// child has no value yet.
pub fn interpolated_value(tree: &GameTree, parent: NodeId, child: NodeId) -> Option<Value> {
    let own = tree.node(child).value()?;
    let column = tree.node(child).action()?;
    let sibling = |c: usize| tree.child_by_action(parent, c).and_then(|s| tree.node(s).value());
    let left = column.checked_sub(1).and_then(sibling);
    let right = sibling(column + 1);
    Some(blend(own, left, right))
}

/// Back up the value of `id` from its children, computing any child value
/// that is still missing first. Returns the node's value and chosen column.
///
/// A node that already has a value keeps it. A node without children is
/// evaluated statically.
pub fn back_up<E: Evaluator>(tree: &mut GameTree, id: NodeId, eval: &E) -> (Value, Option<usize>) {
    if let Some(value) = tree.node(id).value() {
        return (value, tree.node(id).best_action());
    }
    let children = tree.node(id).children().to_vec();
    if children.is_empty() {
        return (tree.evaluate_leaf(id, eval), None);
    }
    for &child in children.iter() {
        if tree.node(child).value().is_none() {
            back_up(tree, child, eval);
        }
    }

    let maximizing = tree.node(id).mover() == Player::Max;
    let mut best = if maximizing { WORST_VALUE } else { BEST_VALUE };
    let mut best_action = None;
    for &child in children.iter() {
        let (Some(value), Some(column)) = (interpolated_value(tree, id, child), tree.node(child).action())
        else {
            continue;
        };
        tree.set_expected_value(child, value);
        // Strictly better only, so ties go to the lowest column.
        if (maximizing && value > best) || (!maximizing && value < best) {
            best = value;
            best_action = Some(column);
        }
    }
    (tree.set_value(id, best, best_action), best_action)
}

/// Re-run the backup over a whole tree that may already carry values from
/// another pass. Interior values are discarded first; leaf evaluations are
/// kept. The root's result is also stored as its expected value.
pub fn back_up_tree<E: Evaluator>(tree: &mut GameTree, eval: &E) -> (Value, Option<usize>) {
    tree.invalidate_backed_up_values();
    let root = tree.root();
    let (value, action) = back_up(tree, root, eval);
    tree.set_expected_value(root, value);
    (value, action)
}
