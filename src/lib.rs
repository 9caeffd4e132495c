//! Game-tree search for Connect Four.
//!
//! A search expands every reachable state up to a depth bound, scores the
//! frontier with a window-counting heuristic and backs values up to the
//! root, either by plain minimax or by blending each child with its
//! neighbouring columns. Alpha-beta pruning can be switched on independently
//! of how values are backed up.
//!
//! ```
//! use connect4_minimax::{search, Algorithm, Grid};
//!
//! let result = search(&Grid::new(), 3, Algorithm::AlphaBeta).unwrap();
//! assert!(result.action.is_some());
//! ```

pub mod board;
pub mod error;
pub mod evaluator;
pub mod interface;
pub mod report;
pub mod strategies;
pub mod tree;
pub mod ui;
pub mod util;

pub use board::{Cell, Grid, CAPACITY, COLS, ROWS};
pub use error::{Error, Result};
pub use evaluator::{WindowEvaluator, Weights};
pub use interface::{Evaluation, Evaluator, Player, Strategy, Value};
pub use report::{GameStatus, MoveResponse, Outcome, ReportOptions, TreeReport};
pub use strategies::expected::{back_up, back_up_tree};
pub use strategies::minimax::{search, Algorithm, Backup, Minimax, Options, Pruning, SearchResult};
pub use strategies::random::Random;
pub use tree::{GameTree, Node, NodeId};
