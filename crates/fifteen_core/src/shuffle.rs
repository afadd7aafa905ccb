//! Board randomization.
//!
//! Shuffling composes random *legal* moves from the solved state, so
//! every board it produces is solvable by construction. Naive random
//! permutations are unsolvable half the time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::board::Board;

/// Number of random legal moves a default shuffle performs.
///
/// Far past the 4x4 puzzle's diameter (~80 moves), which is enough to
/// statistically randomize the board.
pub const DEFAULT_SHUFFLE_MOVES: u32 = 1000;

/// Randomizes boards via sequences of legal moves.
pub struct Shuffler {
    rng: StdRng,
}

impl Shuffler {
    /// Creates a shuffler seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a shuffler with a fixed seed, for reproducible deals.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Resets `board` to solved, then performs exactly `moves` random
    /// legal single-step moves: locate the empty slot, pick a uniform
    /// random neighbor, swap.
    ///
    /// Pure board randomization; session counters are the controller's
    /// concern.
    #[instrument(skip(self, board))]
    pub fn shuffle(&mut self, board: &mut Board, moves: u32) {
        *board = Board::solved();
        for _ in 0..moves {
            let empty = board.empty_index();
            let neighbors = Board::neighbors(empty);
            let pick = neighbors[self.rng.gen_range(0..neighbors.len())];
            board.swap(empty, pick);
        }
        debug!(moves, "board shuffled");
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::new()
    }
}
