//! Uniform random baseline player

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ports::Player,
    tictactoe::{BoardState, Mark},
};

/// Picks uniformly among the available cells
pub struct RandomPlayer {
    mark: Mark,
    rng: StdRng,
}

impl RandomPlayer {
    /// Create a random player with an entropy-seeded generator
    pub fn new(mark: Mark) -> Self {
        Self::with_seed(mark, random())
    }

    /// Create a random player with a deterministic seed
    pub fn with_seed(mark: Mark, seed: u64) -> Self {
        Self {
            mark,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    fn name(&self) -> &str {
        "RandomPlayer"
    }

    fn make_move(&mut self, _reward: f64, _state: &BoardState, available: &[usize]) -> Result<usize> {
        if available.is_empty() {
            return Err(Error::NoValidMoves);
        }
        let index = self.rng.random_range(0..available.len());
        Ok(available[index])
    }
}
