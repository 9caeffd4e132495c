//! The common structures and traits.

use crate::board::{Cell, Grid};
use std::fmt::{Display, Formatter, Result};
use std::ops::Not;

/// A static assessment of a grid, always from MAX's perspective.
/// Positive values favour MAX, negative values favour MIN.
pub type Evaluation = i32;

/// A value backed up through the game tree.
///
/// Minimax backup only ever copies leaf evaluations upwards, but the
/// expected-value backup blends sibling values, so tree values are real
/// numbers rather than integers.
pub type Value = f64;

/// Greater than any value a search can back up.
pub const BEST_VALUE: Value = f64::INFINITY;
/// Less than any value a search can back up.
pub const WORST_VALUE: Value = -BEST_VALUE;

/// One of the two sides. MAX is the searching agent, MIN its opponent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Max,
    Min,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }

    /// The mark this player leaves in the grid.
    pub fn mark(self) -> Cell {
        match self {
            Player::Max => Cell::Max,
            Player::Min => Cell::Min,
        }
    }

    /// `+1` for MAX, `-1` for MIN.
    pub fn sign(self) -> Evaluation {
        match self {
            Player::Max => 1,
            Player::Min => -1,
        }
    }
}

impl Not for Player {
    type Output = Player;
    fn not(self) -> Player {
        self.opponent()
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter) -> Result {
        f.write_str(match *self {
            Player::Max => "MAX",
            Player::Min => "MIN",
        })
    }
}

/// Evaluates a grid without searching any further.
pub trait Evaluator {
    /// Evaluate the grid from MAX's perspective.
    fn evaluate(&self, grid: &Grid) -> Evaluation;
}

/// Defines a method of choosing a move.
///
/// Strategies always play MAX. To let a strategy play MIN, hand it the grid
/// with the sides swapped (see [`Grid::swap_sides`]).
pub trait Strategy {
    /// Pick a column for MAX, or `None` when the grid is full.
    fn choose_move(&mut self, grid: &Grid) -> Option<usize>;
}
