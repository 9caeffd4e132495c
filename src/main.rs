use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use connect4_minimax::report::{MoveResponse, ReportOptions};
use connect4_minimax::ui::{grid_from_ui, UiBoard};
use connect4_minimax::util::play_out;
use connect4_minimax::{
    Algorithm, Backup, GameStatus, Grid, Minimax, Options, Player, Random, WindowEvaluator, Weights,
};
use log::{info, Level};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// More logging: -v info, -vv debug, -vvv trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for the AI's move and print the response as JSON.
    Move {
        #[command(flatten)]
        search: SearchArgs,
        /// Board file: a JSON UI board, or six text rows top first. `-` reads stdin.
        #[arg(long)]
        board: Option<PathBuf>,
        /// Limit how deep the printed tree goes.
        #[arg(long)]
        tree_depth: Option<usize>,
        /// Leave the tree out of the response.
        #[arg(long)]
        no_tree: bool,
    },
    /// Drop a human piece into a column and print the response as JSON.
    Drop {
        #[arg(long)]
        board: Option<PathBuf>,
        #[arg(long)]
        column: usize,
    },
    /// Report whether the game on a board is over.
    Status {
        #[arg(long)]
        board: Option<PathBuf>,
    },
    /// Let the AI play a whole game against a random opponent.
    Play {
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    #[arg(long, default_value = "alpha-beta")]
    algorithm: Algorithm,
    #[arg(long, default_value_t = 4)]
    depth: usize,
    #[arg(long, value_enum, default_value_t = WeightTable::Imminent)]
    weights: WeightTable,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum WeightTable {
    Basic,
    Imminent,
}

impl SearchArgs {
    fn engine(&self) -> anyhow::Result<Minimax<WindowEvaluator>> {
        let weights = match self.weights {
            WeightTable::Basic => Weights::basic(),
            WeightTable::Imminent => Weights::imminent(),
        };
        let opts = Options::from(self.algorithm).with_max_depth(self.depth);
        Ok(Minimax::new(WindowEvaluator::new(weights), opts)?)
    }
}

fn read_board(path: Option<&PathBuf>) -> anyhow::Result<Grid> {
    let Some(path) = path else {
        return Ok(Grid::new());
    };
    let mut text = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin().read_to_string(&mut text)?;
    } else {
        text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    }
    if text.trim_start().starts_with('[') {
        let board: UiBoard = serde_json::from_str(&text).context("parsing JSON board")?;
        Ok(grid_from_ui(&board)?)
    } else {
        Ok(text.parse::<Grid>()?)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    simple_logger::init_with_level(level)?;

    match args.command {
        Command::Move { search, board, tree_depth, no_tree } => {
            let grid = read_board(board.as_ref())?;
            let engine = search.engine()?;
            let result = engine.search(&grid)?;
            let Some(column) = result.action else {
                bail!("no valid moves available");
            };
            info!("{} chose column {} (value {})", search.algorithm, column, result.value);
            let after = grid.with_move(column, Player::Max)?;
            let opts = ReportOptions {
                expected: engine.options().backup == Backup::Expected,
                max_depth: tree_depth,
            };
            let mut response = MoveResponse::searched(&after, column, &result, opts);
            if no_tree {
                response.tree = None;
            }
            println!("{}", serde_json::to_string(&response)?);
        }
        Command::Drop { board, column } => {
            let grid = read_board(board.as_ref())?;
            let after = grid.with_move(column, Player::Min)?;
            println!("{}", serde_json::to_string(&MoveResponse::played(&after, column))?);
        }
        Command::Status { board } => {
            let grid = read_board(board.as_ref())?;
            println!("{}", serde_json::to_string(&GameStatus::of(&grid))?);
        }
        Command::Play { search } => {
            let mut engine = search.engine()?;
            let (grid, status) = play_out(Grid::new(), Player::Max, &mut engine, &mut Random::new());
            println!("{}", grid);
            println!("{}", serde_json::to_string(&status)?);
        }
    }
    Ok(())
}
