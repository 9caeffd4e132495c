//! The game tree built by a search, stored as an arena of states.
//!
//! Nodes are addressed by [`NodeId`]. A node owns its children through a
//! list of ids and knows its parent only as an id, so the tree has no
//! reference cycles and is freed in one go when dropped.

use crate::board::Grid;
use crate::error::Result;
use crate::interface::{Evaluator, Player, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The alpha-beta window in force when a node was created. Kept for display
/// only; pruning never reads it back.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub alpha: Value,
    pub beta: Value,
}

/// One board state in the tree.
#[derive(Clone, Debug)]
pub struct Node {
    grid: Grid,
    mover: Player,
    // The column played to get from the parent to here.
    // Only None at the root.
    action: Option<usize>,
    parent: Option<NodeId>,
    // In the order the search explored them.
    children: Vec<NodeId>,
    value: Option<Value>,
    best_action: Option<usize>,
    expected_value: Option<Value>,
    bounds: Option<Bounds>,
}

impl Node {
    fn new(grid: Grid, mover: Player, action: Option<usize>, parent: Option<NodeId>) -> Node {
        Node {
            grid,
            mover,
            action,
            parent,
            children: Vec::new(),
            value: None,
            best_action: None,
            expected_value: None,
            bounds: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The side to move in this state.
    pub fn mover(&self) -> Player {
        self.mover
    }

    pub fn action(&self) -> Option<usize> {
        self.action
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The static or backed-up value, once computed.
    pub fn value(&self) -> Option<Value> {
        self.value
    }

    /// The column chosen when the value was backed up.
    pub fn best_action(&self) -> Option<usize> {
        self.best_action
    }

    pub fn expected_value(&self) -> Option<Value> {
        self.expected_value
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn available_actions(&self) -> Vec<usize> {
        self.grid.available_actions()
    }

    pub fn is_terminal(&self) -> bool {
        self.grid.is_full()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Every state produced by one search, rooted at `root()`.
#[derive(Clone, Debug)]
pub struct GameTree {
    nodes: Vec<Node>,
}

impl GameTree {
    pub fn new(grid: Grid, mover: Player) -> GameTree {
        GameTree { nodes: vec![Node::new(grid, mover, None, None)] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Play `column` for the mover at `id`, append the resulting state as
    /// the last child of `id` and return it.
    ///
    /// Fails with `ColumnFull` if the column is not available.
    pub fn transition(&mut self, id: NodeId, column: usize, bounds: Option<Bounds>) -> Result<NodeId> {
        let parent = &self.nodes[id.0];
        let grid = parent.grid.with_move(column, parent.mover)?;
        let mut child = Node::new(grid, parent.mover.opponent(), Some(column), Some(id));
        child.bounds = bounds;
        let child_id = NodeId(self.nodes.len());
        self.nodes.push(child);
        self.nodes[id.0].children.push(child_id);
        Ok(child_id)
    }

    /// The child of `id` reached by playing `column`, if it was explored.
    pub fn child_by_action(&self, id: NodeId, column: usize) -> Option<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].action == Some(column))
    }

    /// Number of plies between the root and `id`.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cursor = self.nodes[id.0].parent;
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.nodes[parent.0].parent;
        }
        depth
    }

    /// The columns played from the root down to `id`.
    pub fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            path.extend(self.nodes[node.0].action);
            cursor = self.nodes[node.0].parent;
        }
        path.reverse();
        path
    }

    /// Record the value of `id` unless one is already set, and return the
    /// value the node ends up with.
    pub(crate) fn set_value(&mut self, id: NodeId, value: Value, best_action: Option<usize>) -> Value {
        let node = &mut self.nodes[id.0];
        if node.value.is_none() {
            node.value = Some(value);
            node.best_action = best_action;
        }
        node.value.unwrap_or(value)
    }

    pub(crate) fn set_bounds(&mut self, id: NodeId, bounds: Bounds) {
        self.nodes[id.0].bounds = Some(bounds);
    }

    pub(crate) fn set_expected_value(&mut self, id: NodeId, value: Value) {
        self.nodes[id.0].expected_value = Some(value);
    }

    /// Evaluate `id` statically, caching the score unless a value is already
    /// set.
    pub(crate) fn evaluate_leaf<E: Evaluator>(&mut self, id: NodeId, eval: &E) -> Value {
        if let Some(value) = self.nodes[id.0].value {
            return value;
        }
        let score = eval.evaluate(&self.nodes[id.0].grid) as Value;
        self.set_value(id, score, None)
    }

    /// Forget the backed-up values of every interior node, and all expected
    /// values, leaving leaf evaluations in place.
    pub fn invalidate_backed_up_values(&mut self) {
        for node in self.nodes.iter_mut() {
            if !node.children.is_empty() {
                node.value = None;
                node.best_action = None;
            }
            node.expected_value = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::evaluator::WindowEvaluator;

    #[test]
    fn test_transition_links_parent_and_child() {
        let mut tree = GameTree::new(Grid::new(), Player::Max);
        let root = tree.root();
        let a = tree.transition(root, 3, None).unwrap();
        let b = tree.transition(a, 3, Some(Bounds { alpha: -1.0, beta: 1.0 })).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.node(root).children(), &[a]);
        assert_eq!(tree.node(a).parent(), Some(root));
        assert_eq!(tree.node(a).mover(), Player::Min);
        assert_eq!(tree.node(b).mover(), Player::Max);
        assert_eq!(tree.node(b).action(), Some(3));
        assert_eq!(tree.node(b).bounds(), Some(Bounds { alpha: -1.0, beta: 1.0 }));
        assert_eq!(tree.depth(b), 2);
        assert_eq!(tree.path(b), vec![3, 3]);
        assert_eq!(tree.child_by_action(root, 3), Some(a));
        assert_eq!(tree.child_by_action(root, 4), None);
    }

    #[test]
    fn test_transition_leaves_parent_grid_alone() {
        let mut tree = GameTree::new(Grid::new(), Player::Max);
        let root = tree.root();
        let child = tree.transition(root, 0, None).unwrap();
        assert_eq!(*tree.node(root).grid(), Grid::new());
        let differing = (0..crate::board::ROWS)
            .flat_map(|r| (0..crate::board::COLS).map(move |c| (r, c)))
            .filter(|&(r, c)| tree.node(root).grid().get(r, c) != tree.node(child).grid().get(r, c))
            .count();
        assert_eq!(differing, 1);
    }

    #[test]
    fn test_transition_into_full_column() {
        let mut grid = Grid::new();
        for _ in 0..crate::board::ROWS {
            grid = grid.with_move(6, Player::Min).unwrap();
        }
        let mut tree = GameTree::new(grid, Player::Max);
        let root = tree.root();
        assert_eq!(tree.transition(root, 6, None), Err(Error::ColumnFull { column: 6 }));
        assert!(tree.node(root).children().is_empty());
        assert_eq!(tree.node(root).available_actions(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_values_are_set_once() {
        let mut tree = GameTree::new(Grid::new(), Player::Max);
        let root = tree.root();
        assert_eq!(tree.set_value(root, 5.0, Some(2)), 5.0);
        assert_eq!(tree.set_value(root, 9.0, Some(4)), 5.0);
        assert_eq!(tree.node(root).best_action(), Some(2));
        assert_eq!(tree.evaluate_leaf(root, &WindowEvaluator::default()), 5.0);
    }

    #[test]
    fn test_invalidate_keeps_leaves() {
        let mut tree = GameTree::new(Grid::new(), Player::Max);
        let root = tree.root();
        let child = tree.transition(root, 1, None).unwrap();
        let leaf = tree.evaluate_leaf(child, &WindowEvaluator::default());
        tree.set_value(root, leaf, Some(1));
        tree.set_expected_value(root, leaf);
        tree.invalidate_backed_up_values();
        assert_eq!(tree.node(root).value(), None);
        assert_eq!(tree.node(root).expected_value(), None);
        assert_eq!(tree.node(child).value(), Some(leaf));
    }
}
