//! Uniformly random move source

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{Error, Result, ports::MoveSource, tictactoe::Board};

/// Picks any empty cell with equal probability
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Deterministic player for reproducible simulations
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MoveSource for RandomPlayer {
    fn select_move(&mut self, board: &Board) -> Result<(usize, usize)> {
        let moves = board.empty_cells();
        if moves.is_empty() {
            return Err(Error::NoValidMoves);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
