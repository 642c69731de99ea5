//! Move selection capability shared by every player.

use std::fmt;

use rand::{RngCore, seq::IndexedRandom as _};
use triqui_engine::{Board, Mark};

/// A player that picks a cell for the given board and mark.
///
/// Randomness is drawn from the caller-supplied `rng`, never from a global source.
pub trait Agent: fmt::Debug + Send + Sync {
    /// Returns the chosen cell index, or `None` only when the board has no legal move.
    ///
    /// The returned index is always one of [`Board::legal_moves`].
    fn choose_move(&self, board: &Board, mark: Mark, rng: &mut dyn RngCore) -> Option<usize>;
}

/// Baseline opponent: uniformly random legal move.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAgent;

impl RandomAgent {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Agent for RandomAgent {
    fn choose_move(&self, board: &Board, _mark: Mark, rng: &mut dyn RngCore) -> Option<usize> {
        board.legal_moves().choose(rng).copied()
    }
}
