//! A strategy that randomly chooses a move, for use in tests.

use super::super::board::Grid;
use super::super::interface::*;
use rand::seq::SliceRandom;

pub struct Random {
    rng: rand::rngs::ThreadRng,
}

impl Random {
    pub fn new() -> Random {
        Random { rng: rand::thread_rng() }
    }
}

impl Default for Random {
    fn default() -> Self {
        Random::new()
    }
}

impl Strategy for Random {
    fn choose_move(&mut self, grid: &Grid) -> Option<usize> {
        grid.available_actions().choose(&mut self.rng).copied()
    }
}
