//! Utility functions for playing whole games.

use super::board::Grid;
use super::interface::{Player, Strategy};
use super::report::GameStatus;
use log::{debug, info};

/// Play a complete, new game with players using the two provided strategies.
///
/// The first strategy plays MAX and moves first; the second plays MIN and is
/// shown the grid with sides swapped, so that it too chooses as MAX. Play
/// continues until the grid is full, or until a strategy declines to move.
pub fn battle_royale<S1, S2>(s1: &mut S1, s2: &mut S2) -> GameStatus
where
    S1: Strategy + ?Sized,
    S2: Strategy + ?Sized,
{
    let (grid, status) = play_out(Grid::new(), Player::Max, s1, s2);
    debug!("final position:\n{}", grid);
    status
}

/// Play from `grid` with `to_move` on move until the grid is full. Returns
/// the final grid and its status.
pub fn play_out<S1, S2>(mut grid: Grid, mut to_move: Player, max: &mut S1, min: &mut S2) -> (Grid, GameStatus)
where
    S1: Strategy + ?Sized,
    S2: Strategy + ?Sized,
{
    while !grid.is_full() {
        let choice = match to_move {
            Player::Max => max.choose_move(&grid),
            Player::Min => min.choose_move(&grid.swap_sides()),
        };
        let next = choice.and_then(|column| grid.with_move(column, to_move).ok());
        match next {
            Some(next) => grid = next,
            None => {
                info!("{} declined to move", to_move);
                break;
            }
        }
        to_move = to_move.opponent();
    }
    (grid, GameStatus::of(&grid))
}
