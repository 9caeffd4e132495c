//! Error type for the crate.

use crate::board::{COLS, ROWS};
use thiserror::Error;

/// Every failure here is a broken caller precondition; none are retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range (expected 0..{})", COLS)]
    ColumnOutOfRange { column: usize },

    #[error("search depth {depth} exceeds the board capacity of {max}")]
    DepthOutOfRange { depth: usize, max: usize },

    #[error("board has {got} rows, expected {}", ROWS)]
    InvalidRowCount { got: usize },

    #[error("board row {row} has {got} cells, expected {}", COLS)]
    InvalidColumnCount { row: usize, got: usize },

    #[error("board text has {got} cells, expected {expected}")]
    InvalidBoardLength { expected: usize, got: usize },

    #[error("invalid character '{character}' at position {position}")]
    InvalidCellCharacter { character: char, position: usize },

    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, Error>;
