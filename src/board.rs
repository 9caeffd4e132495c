//! The Connect Four grid and the four-cell windows used to score it.

use crate::error::{Error, Result};
use crate::interface::Player;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Number of cells, and so the longest any game can last.
pub const CAPACITY: usize = ROWS * COLS;
/// Length of a line that wins, and of every scoring window.
pub const WINDOW_LEN: usize = 4;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty,
    Max,
    Min,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The owner of the mark, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Max => Some(Player::Max),
            Cell::Min => Some(Player::Min),
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Max => 'X',
            Cell::Min => 'O',
        }
    }

    fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Max),
            'O' | 'o' => Some(Cell::Min),
            _ => None,
        }
    }
}

/// A 6x7 grid. Row 0 is the bottom row, the first a dropped piece can
/// occupy; row 5 is the top row, which decides whether a column is open.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [[Cell; COLS]; ROWS],
}

impl Grid {
    pub fn new() -> Grid {
        Grid::default()
    }

    /// Build a grid from rows, bottom row first. Gravity is not checked.
    pub fn from_rows(cells: [[Cell; COLS]; ROWS]) -> Grid {
        Grid { cells }
    }

    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// # Panics
    ///
    /// Panics if `row >= ROWS` or `col >= COLS`.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Overwrite one cell. Gravity is not checked.
    ///
    /// # Panics
    ///
    /// Panics if `row >= ROWS` or `col >= COLS`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// A column is open iff its top cell is empty.
    pub fn is_open(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col].is_empty()
    }

    /// Open columns, ascending.
    pub fn available_actions(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_open(col)).collect()
    }

    /// True iff no column is open. A completed four-in-a-row does not end the
    /// game; only a full grid does.
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_open(col))
    }

    /// The row a piece dropped into `col` would land in.
    pub fn open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).find(|&row| self.cells[row][col].is_empty())
    }

    /// Whether a piece could land on this exact cell with the next move.
    ///
    /// # Panics
    ///
    /// Panics if `row >= ROWS` or `col >= COLS`.
    pub fn is_playable(&self, row: usize, col: usize) -> bool {
        self.cells[row][col].is_empty() && (row == 0 || !self.cells[row - 1][col].is_empty())
    }

    /// Return a copy of the grid with `player`'s mark dropped into `col`.
    pub fn with_move(&self, col: usize, player: Player) -> Result<Grid> {
        if col >= COLS {
            return Err(Error::ColumnOutOfRange { column: col });
        }
        let row = self.open_row(col).ok_or(Error::ColumnFull { column: col })?;
        let mut next = *self;
        next.cells[row][col] = player.mark();
        Ok(next)
    }

    /// The same position seen from the other side: every MAX mark becomes a
    /// MIN mark and vice versa.
    pub fn swap_sides(&self) -> Grid {
        let mut swapped = *self;
        for cell in swapped.cells.iter_mut().flatten() {
            *cell = match *cell {
                Cell::Empty => Cell::Empty,
                Cell::Max => Cell::Min,
                Cell::Min => Cell::Max,
            };
        }
        swapped
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// The four cells of `window`.
    pub fn window_cells(&self, window: &Window) -> [Cell; WINDOW_LEN] {
        let mut out = [Cell::Empty; WINDOW_LEN];
        for (slot, &(row, col)) in out.iter_mut().zip(window.cells.iter()) {
            *slot = self.cells[row][col];
        }
        out
    }

    /// Tally the windows that `player` still has a claim on.
    pub fn window_counts(&self, player: Player) -> WindowCounts {
        let mine = player.mark();
        let theirs = player.opponent().mark();
        let mut counts = WindowCounts::default();
        for window in windows() {
            let cells = self.window_cells(&window);
            if cells.contains(&theirs) {
                continue;
            }
            let n = cells.iter().filter(|&&c| c == mine).count();
            let empty = WINDOW_LEN - n;
            match (n, empty) {
                (4, _) => counts.complete += 1,
                (3, 1) => {
                    counts.near += 1;
                    let gap = window.cells.iter().find(|&&(r, c)| self.cells[r][c].is_empty());
                    if let Some(&(row, col)) = gap {
                        if self.is_playable(row, col) {
                            counts.imminent += 1;
                        }
                    }
                }
                (2, 2) => counts.pair += 1,
                _ => {}
            }
            if n >= 1 {
                counts.reachable += 1;
            }
        }
        counts
    }
}

/// Per-side tallies over all windows free of opposing marks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowCounts {
    /// Four own marks.
    pub complete: usize,
    /// Three own marks and one empty cell.
    pub near: usize,
    /// Near windows whose empty cell can be filled on the very next move.
    pub imminent: usize,
    /// Two own marks and two empty cells.
    pub pair: usize,
    /// At least one own mark.
    pub reachable: usize,
}

/// Four cells in a straight line, as `(row, col)` pairs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub cells: [(usize, usize); WINDOW_LEN],
}

// Horizontal, vertical, diagonal up-right, diagonal down-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

impl Window {
    fn starting_at(row: usize, col: usize, (dr, dc): (isize, isize)) -> Option<Window> {
        let mut cells = [(0, 0); WINDOW_LEN];
        for (i, slot) in cells.iter_mut().enumerate() {
            let r = row as isize + dr * i as isize;
            let c = col as isize + dc * i as isize;
            if r < 0 || c < 0 || r >= ROWS as isize || c >= COLS as isize {
                return None;
            }
            *slot = (r as usize, c as usize);
        }
        Some(Window { cells })
    }
}

/// Every window on the grid: 24 horizontal, 21 vertical, 12 per diagonal.
pub fn windows() -> impl Iterator<Item = Window> {
    DIRECTIONS.into_iter().flat_map(|dir| {
        (0..ROWS).flat_map(move |row| (0..COLS).filter_map(move |col| Window::starting_at(row, col, dir)))
    })
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for row in self.cells.iter().rev() {
            for cell in row.iter() {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses six lines of seven cells, top row first, as written by `Display`.
/// `.` is empty, `X` is MAX, `O` is MIN. Whitespace is ignored.
impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Grid> {
        let mut cells = Vec::with_capacity(CAPACITY);
        for (position, character) in s.chars().filter(|c| !c.is_whitespace()).enumerate() {
            let cell = Cell::from_char(character)
                .ok_or(Error::InvalidCellCharacter { character, position })?;
            cells.push(cell);
        }
        if cells.len() != CAPACITY {
            return Err(Error::InvalidBoardLength { expected: CAPACITY, got: cells.len() });
        }
        let mut grid = Grid::new();
        for (i, cell) in cells.into_iter().enumerate() {
            grid.cells[ROWS - 1 - i / COLS][i % COLS] = cell;
        }
        Ok(grid)
    }
}
