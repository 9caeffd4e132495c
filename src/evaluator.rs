//! Static evaluation of a grid by counting four-cell windows.

use crate::board::{Cell, Grid, WindowCounts, COLS, ROWS};
use crate::interface::{Evaluation, Evaluator, Player};

/// Weights for each kind of window.
///
/// Two tables are provided. They are not interchangeable: a value produced
/// under one table means nothing under the other.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Weights {
    /// Per window holding four of a side's marks.
    pub complete: Evaluation,
    /// Per near window whose gap can be filled on the very next move.
    pub imminent: Evaluation,
    /// Per near window beyond the first.
    pub extra_near: Evaluation,
    /// Per window with three marks and one gap.
    pub near: Evaluation,
    /// Per window with two marks and two gaps.
    pub pair: Evaluation,
    /// Per window with at least one mark.
    pub reachable: Evaluation,
    /// Per mark in the centre column. Zero in both tables.
    pub center: Evaluation,
}

impl Weights {
    /// The plain table: fours dominate, no gravity awareness.
    pub const fn basic() -> Weights {
        Weights { complete: 5000, imminent: 0, extra_near: 0, near: 100, pair: 10, reachable: 1, center: 0 }
    }

    /// The gravity-aware table, rewarding threats that can be completed on
    /// the next move and multiple simultaneous threats.
    pub const fn imminent() -> Weights {
        Weights {
            complete: 1500,
            imminent: 1000,
            extra_near: 300,
            near: 100,
            pair: 10,
            reachable: 1,
            center: 0,
        }
    }

    fn side_score(&self, counts: &WindowCounts, center_marks: usize) -> Evaluation {
        let n = |x: usize| x as Evaluation;
        self.complete * n(counts.complete)
            + self.imminent * n(counts.imminent)
            + self.extra_near * n(counts.near.saturating_sub(1))
            + self.near * n(counts.near)
            + self.pair * n(counts.pair)
            + self.reachable * n(counts.reachable)
            + self.center * n(center_marks)
    }
}

impl Default for Weights {
    fn default() -> Weights {
        Weights::imminent()
    }
}

/// Scores every window for both sides and returns MAX's total minus MIN's.
#[derive(Copy, Clone, Debug, Default)]
pub struct WindowEvaluator {
    weights: Weights,
}

impl WindowEvaluator {
    pub fn new(weights: Weights) -> WindowEvaluator {
        WindowEvaluator { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    fn side(&self, grid: &Grid, player: Player) -> Evaluation {
        let center = center_marks(grid, player.mark());
        self.weights.side_score(&grid.window_counts(player), center)
    }
}

impl Evaluator for WindowEvaluator {
    fn evaluate(&self, grid: &Grid) -> Evaluation {
        self.side(grid, Player::Max) - self.side(grid, Player::Min)
    }
}

/// Returns the number of complete fours held by each side, as (MAX, MIN).
pub fn four_counts(grid: &Grid) -> (usize, usize) {
    (grid.window_counts(Player::Max).complete, grid.window_counts(Player::Min).complete)
}

/// Number of marks `cell` has in the centre column.
pub fn center_marks(grid: &Grid, cell: Cell) -> usize {
    (0..ROWS).filter(|&row| grid.get(row, COLS / 2) == cell).count()
}
