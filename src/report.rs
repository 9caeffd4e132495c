//! Serializable summaries of a search tree and of a finished game.

use crate::board::Grid;
use crate::evaluator::four_counts;
use crate::interface::{Player, Value};
use crate::strategies::minimax::SearchResult;
use crate::tree::{GameTree, NodeId};
use crate::ui::{grid_to_ui, UiBoard};
use serde::{Deserialize, Serialize};

/// How a node is labelled in a tree report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Max,
    Min,
    /// No children were expanded, or the grid is full.
    Leaf,
}

/// A nested, display-friendly copy of a search tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeReport {
    pub value: Option<Value>,
    pub player: Role,
    pub depth: usize,
    #[serde(rename = "move")]
    pub action: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<Value>,
    pub children: Vec<TreeReport>,
}

/// What to include in a [`TreeReport`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ReportOptions {
    /// Emit expected values where the search computed them.
    pub expected: bool,
    /// Stop descending below this depth.
    pub max_depth: Option<usize>,
}

impl TreeReport {
    pub fn new(tree: &GameTree, opts: ReportOptions) -> TreeReport {
        Self::node(tree, tree.root(), 0, &opts)
    }

    fn node(tree: &GameTree, id: NodeId, depth: usize, opts: &ReportOptions) -> TreeReport {
        let node = tree.node(id);
        let player = if node.is_leaf() || node.is_terminal() {
            Role::Leaf
        } else {
            match node.mover() {
                Player::Max => Role::Max,
                Player::Min => Role::Min,
            }
        };
        let descend = opts.max_depth.map_or(true, |max| depth < max);
        let children = if descend {
            node.children().iter().map(|&child| Self::node(tree, child, depth + 1, opts)).collect()
        } else {
            Vec::new()
        };
        TreeReport {
            value: node.value(),
            player,
            depth,
            action: node.action(),
            expected: if opts.expected { node.expected_value() } else { None },
            alpha: node.bounds().map(|b| b.alpha),
            beta: node.bounds().map(|b| b.beta),
            children,
        }
    }

    /// Total number of nodes in the report.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeReport::size).sum::<usize>()
    }
}

/// The side ahead when the board filled up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// MAX holds more complete fours.
    Ai,
    /// MIN holds more complete fours.
    Human,
    Draw,
}

/// Complete four-windows held by each side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub ai: usize,
    pub human: usize,
}

/// Whether the game is over and, if so, who won.
///
/// The game ends only when the grid is full; the side with more complete
/// fours wins. `score` always holds the current four counts, also while the
/// game is still running.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub game_over: bool,
    pub winner: Option<Outcome>,
    pub score: Score,
}

impl GameStatus {
    pub fn of(grid: &Grid) -> GameStatus {
        let (ai, human) = four_counts(grid);
        let score = Score { ai, human };
        if !grid.is_full() {
            return GameStatus { game_over: false, winner: None, score };
        }
        let winner = match ai.cmp(&human) {
            std::cmp::Ordering::Greater => Outcome::Ai,
            std::cmp::Ordering::Less => Outcome::Human,
            std::cmp::Ordering::Equal => Outcome::Draw,
        };
        GameStatus { game_over: true, winner: Some(winner), score }
    }
}

/// The reply to a move request: the board after the move, the move itself
/// and, for searches, the value and tree behind it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub board: UiBoard,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_expanded: Option<usize>,
    #[serde(flatten)]
    pub status: GameStatus,
    pub tree: Option<TreeReport>,
}

impl MoveResponse {
    /// A move played without searching, e.g. by the human side.
    pub fn played(after: &Grid, column: usize) -> MoveResponse {
        MoveResponse {
            board: grid_to_ui(after),
            column,
            value: None,
            nodes_expanded: None,
            status: GameStatus::of(after),
            tree: None,
        }
    }

    /// The move a search chose, already applied to `after`.
    pub fn searched(after: &Grid, column: usize, result: &SearchResult, opts: ReportOptions) -> MoveResponse {
        MoveResponse {
            value: Some(result.value),
            nodes_expanded: Some(result.nodes_expanded),
            tree: Some(TreeReport::new(&result.tree, opts)),
            ..MoveResponse::played(after, column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, COLS, ROWS};
    use crate::strategies::minimax::{search, Algorithm};

    #[test]
    fn test_report_shape() {
        let result = search(&Grid::new(), 2, Algorithm::Expectiminimax).unwrap();
        let report = TreeReport::new(&result.tree, ReportOptions { expected: true, max_depth: None });
        assert_eq!(report.size(), result.tree.len());
        assert_eq!(report.player, Role::Max);
        assert_eq!(report.action, None);
        assert_eq!(report.expected, Some(result.value));
        assert_eq!(report.children.len(), COLS);
        assert_eq!(report.children[0].player, Role::Min);
        assert_eq!(report.children[0].children[0].player, Role::Leaf);
        assert_eq!(report.children[0].children[0].depth, 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["player"], "MAX");
        assert!(json["move"].is_null());
        assert_eq!(json["children"][3]["move"], 3);
    }

    #[test]
    fn test_report_depth_limit_and_expected_flag() {
        let result = search(&Grid::new(), 2, Algorithm::Minimax).unwrap();
        let report = TreeReport::new(&result.tree, ReportOptions { expected: true, max_depth: Some(1) });
        assert_eq!(report.size(), 1 + COLS);
        assert_eq!(report.expected, None);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("expected").is_none());
    }

    #[test]
    fn test_status_score_is_live_before_game_over() {
        let grid: Grid = "\
.......
.......
.......
.......
.......
XXXXOOO
"
        .parse()
        .unwrap();
        let status = GameStatus::of(&grid);
        assert!(!status.game_over);
        assert_eq!(status.winner, None);
        assert_eq!(status.score, Score { ai: 1, human: 0 });
    }

    #[test]
    fn test_status_requires_full_board() {
        let status = GameStatus::of(&Grid::new());
        assert!(!status.game_over);
        assert_eq!(status.winner, None);

        let mut grid = Grid::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                // MAX owns the three left columns outright.
                let cell = if col < 3 || (row + col) % 2 == 0 { Cell::Max } else { Cell::Min };
                grid.set(row, col, cell);
            }
        }
        let status = GameStatus::of(&grid);
        assert!(status.game_over);
        assert_eq!(status.winner, Some(Outcome::Ai));
        assert!(status.score.ai > status.score.human);
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(json["gameOver"], true);
        assert_eq!(json["winner"], "ai");
    }
}
