//! Depth-limited minimax over a materialized game tree.
//!
//! One engine covers all four search variants. Pruning (none or alpha-beta)
//! decides which states get expanded; backup (minimax or expected-value)
//! decides what value each expanded state reports. The two are chosen
//! independently through [`Options`].

use super::super::board::{Grid, CAPACITY};
use super::super::error::{Error, Result};
use super::super::evaluator::WindowEvaluator;
use super::super::interface::*;
use super::super::tree::{Bounds, GameTree, NodeId};
use super::expected;

use log::{debug, error, trace};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Depth used when the caller does not pick one.
pub const DEFAULT_DEPTH: usize = 10;
/// No game lasts longer than this, so no search needs to look deeper.
pub const MAX_DEPTH: usize = CAPACITY;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pruning {
    /// Expand every available column.
    #[default]
    None,
    /// Skip the remaining columns of a node once its alpha-beta window closes.
    AlphaBeta,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backup {
    /// A node takes its best child's value outright.
    #[default]
    Minimax,
    /// A node takes the best of its children's sibling-interpolated values.
    Expected,
}

/// The four named search variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
    Expectiminimax,
    ExpectiminimaxAlphaBeta,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Minimax,
        Algorithm::AlphaBeta,
        Algorithm::Expectiminimax,
        Algorithm::ExpectiminimaxAlphaBeta,
    ];

    /// Pick a variant from a UI-style algorithm family name
    /// (`"minimax"` or `"expectiminimax"`) and a pruning flag.
    pub fn from_family(family: &str, alpha_beta: bool) -> Result<Algorithm> {
        match (family, alpha_beta) {
            ("minimax", false) => Ok(Algorithm::Minimax),
            ("minimax", true) => Ok(Algorithm::AlphaBeta),
            ("expectiminimax", false) => Ok(Algorithm::Expectiminimax),
            ("expectiminimax", true) => Ok(Algorithm::ExpectiminimaxAlphaBeta),
            _ => Err(Error::UnknownAlgorithm(family.to_string())),
        }
    }

    pub fn pruning(self) -> Pruning {
        match self {
            Algorithm::Minimax | Algorithm::Expectiminimax => Pruning::None,
            Algorithm::AlphaBeta | Algorithm::ExpectiminimaxAlphaBeta => Pruning::AlphaBeta,
        }
    }

    pub fn backup(self) -> Backup {
        match self {
            Algorithm::Minimax | Algorithm::AlphaBeta => Backup::Minimax,
            Algorithm::Expectiminimax | Algorithm::ExpectiminimaxAlphaBeta => Backup::Expected,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alpha-beta",
            Algorithm::Expectiminimax => "expectiminimax",
            Algorithm::ExpectiminimaxAlphaBeta => "expectiminimax-alpha-beta",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

/// Options to use for the `Minimax` engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// The maximum depth within the game tree.
    pub max_depth: usize,
    pub pruning: Pruning,
    pub backup: Backup,
}

impl Options {
    pub fn new() -> Self {
        Options { max_depth: DEFAULT_DEPTH, pruning: Pruning::None, backup: Backup::Minimax }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_backup(mut self, backup: Backup) -> Self {
        self.backup = backup;
        self
    }

    /// Fails if the depth exceeds what any game could need.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth > MAX_DEPTH {
            return Err(Error::DepthOutOfRange { depth: self.max_depth, max: MAX_DEPTH });
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::new()
    }
}

impl From<Algorithm> for Options {
    fn from(algorithm: Algorithm) -> Options {
        Options::new().with_pruning(algorithm.pruning()).with_backup(algorithm.backup())
    }
}

/// What a search found, plus the tree it built to find it.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// The root's backed-up value.
    pub value: Value,
    /// The chosen column; `None` iff the grid was already full.
    pub action: Option<usize>,
    pub tree: GameTree,
    /// Number of leaves evaluated. Pruned subtrees contribute nothing.
    pub nodes_expanded: usize,
}

// The outcome of expanding one node.
struct Expansion {
    value: Value,
    action: Option<usize>,
    nodes: usize,
}

/// Searches from MAX's point of view, keeping every state it expands.
pub struct Minimax<E: Evaluator> {
    opts: Options,
    eval: E,
}

impl<E: Evaluator> Minimax<E> {
    pub fn new(eval: E, opts: Options) -> Result<Minimax<E>> {
        opts.validate()?;
        Ok(Minimax { opts, eval })
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn evaluator(&self) -> &E {
        &self.eval
    }

    /// Search `grid` with MAX to move.
    pub fn search(&self, grid: &Grid) -> Result<SearchResult> {
        let mut tree = GameTree::new(*grid, Player::Max);
        let root = tree.root();
        if self.opts.pruning == Pruning::AlphaBeta {
            tree.set_bounds(root, Bounds { alpha: WORST_VALUE, beta: BEST_VALUE });
        }
        let found = self.expand(&mut tree, root, self.opts.max_depth, WORST_VALUE, BEST_VALUE)?;
        if self.opts.backup == Backup::Expected {
            tree.set_expected_value(root, found.value);
        }
        debug!(
            "{:?}/{:?} search to depth {} expanded {} nodes ({} states): column {:?}, value {}",
            self.opts.pruning,
            self.opts.backup,
            self.opts.max_depth,
            found.nodes,
            tree.len(),
            found.action,
            found.value
        );
        Ok(SearchResult { value: found.value, action: found.action, tree, nodes_expanded: found.nodes })
    }

    fn expand(
        &self, tree: &mut GameTree, id: NodeId, depth: usize, mut alpha: Value, mut beta: Value,
    ) -> Result<Expansion> {
        if depth == 0 || tree.node(id).is_terminal() {
            let value = tree.evaluate_leaf(id, &self.eval);
            trace!("leaf {:?}: {}", tree.path(id), value);
            return Ok(Expansion { value, action: None, nodes: 1 });
        }

        let pruning = self.opts.pruning == Pruning::AlphaBeta;
        let maximizing = tree.node(id).mover() == Player::Max;
        let mut best = if maximizing { WORST_VALUE } else { BEST_VALUE };
        let mut best_action = None;
        let mut nodes = 0;
        for column in tree.node(id).available_actions() {
            let bounds = if pruning { Some(Bounds { alpha, beta }) } else { None };
            let child = tree.transition(id, column, bounds)?;
            let reply = self.expand(tree, child, depth - 1, alpha, beta)?;
            nodes += reply.nodes;
            // Strictly better only, so ties go to the lowest column.
            if (maximizing && reply.value > best) || (!maximizing && reply.value < best) {
                best = reply.value;
                best_action = Some(column);
            }
            if pruning {
                if maximizing {
                    alpha = alpha.max(best);
                } else {
                    beta = beta.min(best);
                }
                if alpha >= beta {
                    trace!("cutoff at {:?} after column {} ({} >= {})", tree.path(id), column, alpha, beta);
                    break;
                }
            }
        }

        let (value, action) = match self.opts.backup {
            Backup::Minimax => (tree.set_value(id, best, best_action), best_action),
            Backup::Expected => expected::back_up(tree, id, &self.eval),
        };
        Ok(Expansion { value, action, nodes })
    }
}

impl<E: Evaluator> Strategy for Minimax<E> {
    fn choose_move(&mut self, grid: &Grid) -> Option<usize> {
        match self.search(grid) {
            Ok(result) => result.action,
            Err(e) => {
                error!("search failed: {}", e);
                None
            }
        }
    }
}

/// Search `grid` for MAX to `depth` plies with one of the four variants and
/// the default evaluator.
pub fn search(grid: &Grid, depth: usize, algorithm: Algorithm) -> Result<SearchResult> {
    let opts = Options::from(algorithm).with_max_depth(depth);
    Minimax::new(WindowEvaluator::default(), opts)?.search(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, COLS, ROWS};

    fn full_grid() -> Grid {
        let mut grid = Grid::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                let max = ((row / 2) + col) % 2 == 0;
                grid.set(row, col, if max { Cell::Max } else { Cell::Min });
            }
        }
        grid
    }

    #[test]
    fn test_algorithm_names() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!(Algorithm::from_family("expectiminimax", true), Ok(Algorithm::ExpectiminimaxAlphaBeta));
        assert_eq!(
            "negamax".parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm("negamax".to_string()))
        );
    }

    #[test]
    fn test_depth_is_bounded() {
        let opts = Options::new().with_max_depth(MAX_DEPTH + 1);
        assert_eq!(
            Minimax::new(WindowEvaluator::default(), opts).err(),
            Some(Error::DepthOutOfRange { depth: MAX_DEPTH + 1, max: MAX_DEPTH })
        );
        assert!(Options::new().with_max_depth(MAX_DEPTH).validate().is_ok());
    }

    #[test]
    fn test_full_grid_has_no_move() {
        let grid = full_grid();
        let expected = WindowEvaluator::default().evaluate(&grid) as Value;
        for algorithm in Algorithm::ALL {
            let result = search(&grid, 4, algorithm).unwrap();
            assert_eq!(result.action, None, "{}", algorithm);
            assert_eq!(result.value, expected, "{}", algorithm);
            assert_eq!(result.nodes_expanded, 1, "{}", algorithm);
            assert_eq!(result.tree.len(), 1);
        }
    }

    #[test]
    fn test_depth_zero_evaluates_root() {
        let grid = Grid::new().with_move(3, Player::Max).unwrap();
        let result = search(&grid, 0, Algorithm::Minimax).unwrap();
        assert_eq!(result.action, None);
        assert_eq!(result.nodes_expanded, 1);
        assert_eq!(result.value, WindowEvaluator::default().evaluate(&grid) as Value);
    }

    #[test]
    fn test_depth_one_picks_best_leaf() {
        let grid = Grid::new();
        let result = search(&grid, 1, Algorithm::Minimax).unwrap();
        let eval = WindowEvaluator::default();
        let scores: Vec<Value> = (0..COLS)
            .map(|c| eval.evaluate(&grid.with_move(c, Player::Max).unwrap()) as Value)
            .collect();
        let best = scores.iter().cloned().fold(WORST_VALUE, Value::max);
        let first_best = scores.iter().position(|&s| s == best);
        assert_eq!(result.value, best);
        assert_eq!(result.action, first_best);
        assert_eq!(result.nodes_expanded, COLS);
        assert_eq!(result.tree.len(), COLS + 1);
    }

    #[test]
    fn test_alpha_beta_records_bounds() {
        let result = search(&Grid::new(), 2, Algorithm::AlphaBeta).unwrap();
        let tree = &result.tree;
        assert!(tree.ids().all(|id| tree.node(id).bounds().is_some()));
        let plain = search(&Grid::new(), 2, Algorithm::Minimax).unwrap();
        assert!(plain.tree.ids().all(|id| plain.tree.node(id).bounds().is_none()));
    }

    #[test]
    fn test_expected_search_sets_root_expected_value() {
        let result = search(&Grid::new(), 2, Algorithm::Expectiminimax).unwrap();
        let root = result.tree.root();
        assert_eq!(result.tree.node(root).expected_value(), Some(result.value));
        assert_eq!(result.tree.node(root).value(), Some(result.value));
        let minimax = search(&Grid::new(), 2, Algorithm::Minimax).unwrap();
        assert_eq!(minimax.tree.node(minimax.tree.root()).expected_value(), None);
    }

    #[test]
    fn test_strategy_moves_until_the_grid_is_full() {
        let mut engine = Minimax::new(WindowEvaluator::default(), Options::new().with_max_depth(2)).unwrap();
        let column = engine.choose_move(&Grid::new());
        assert!(matches!(column, Some(c) if c < COLS));
        assert_eq!(engine.choose_move(&full_grid()), None);
    }
}
