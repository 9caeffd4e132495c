//! Translation between the internal grid and the board a UI sends.
//!
//! A UI board is a list of six rows of seven cells, top row first, where each
//! cell is `null`, `"ai"` (MAX) or `"human"` (MIN).

use crate::board::{Cell, Grid, COLS, ROWS};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiCell {
    Ai,
    Human,
}

pub type UiBoard = Vec<Vec<Option<UiCell>>>;

impl From<UiCell> for Cell {
    fn from(cell: UiCell) -> Cell {
        match cell {
            UiCell::Ai => Cell::Max,
            UiCell::Human => Cell::Min,
        }
    }
}

fn to_ui(cell: Cell) -> Option<UiCell> {
    match cell {
        Cell::Empty => None,
        Cell::Max => Some(UiCell::Ai),
        Cell::Min => Some(UiCell::Human),
    }
}

/// Convert a UI board. The shape must be exactly 6x7.
pub fn grid_from_ui(board: &[Vec<Option<UiCell>>]) -> Result<Grid> {
    if board.len() != ROWS {
        return Err(Error::InvalidRowCount { got: board.len() });
    }
    let mut grid = Grid::new();
    for (i, row) in board.iter().enumerate() {
        if row.len() != COLS {
            return Err(Error::InvalidColumnCount { row: i, got: row.len() });
        }
        for (col, cell) in row.iter().enumerate() {
            grid.set(ROWS - 1 - i, col, cell.map_or(Cell::Empty, Cell::from));
        }
    }
    Ok(grid)
}

pub fn grid_to_ui(grid: &Grid) -> UiBoard {
    grid.rows().iter().rev().map(|row| row.iter().map(|&c| to_ui(c)).collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::Player;

    #[test]
    fn test_ui_rows_are_top_first() {
        let grid = Grid::new().with_move(2, Player::Max).unwrap().with_move(2, Player::Min).unwrap();
        let board = grid_to_ui(&grid);
        assert_eq!(board.len(), ROWS);
        assert_eq!(board[ROWS - 1][2], Some(UiCell::Ai));
        assert_eq!(board[ROWS - 2][2], Some(UiCell::Human));
        assert_eq!(board[0][2], None);
        assert_eq!(grid_from_ui(&board), Ok(grid));
    }

    #[test]
    fn test_ui_json() {
        let mut board: UiBoard = vec![vec![None; COLS]; ROWS];
        board[ROWS - 1][0] = Some(UiCell::Human);
        let json = serde_json::to_string(&board[ROWS - 1]).unwrap();
        assert_eq!(json, r#"["human",null,null,null,null,null,null]"#);
        let parsed: UiBoard = serde_json::from_str(&serde_json::to_string(&board).unwrap()).unwrap();
        assert_eq!(grid_from_ui(&parsed).unwrap().get(0, 0), Cell::Min);
    }

    #[test]
    fn test_ui_shape_errors() {
        let short: UiBoard = vec![vec![None; COLS]; ROWS - 1];
        assert_eq!(grid_from_ui(&short), Err(Error::InvalidRowCount { got: ROWS - 1 }));
        let mut ragged: UiBoard = vec![vec![None; COLS]; ROWS];
        ragged[3].pop();
        assert_eq!(grid_from_ui(&ragged), Err(Error::InvalidColumnCount { row: 3, got: COLS - 1 }));
    }
}
