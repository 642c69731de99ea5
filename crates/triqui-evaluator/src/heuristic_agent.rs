//! Priority-ordered heuristic agent driven by a [`Genome`].
//!
//! # Decision Tiers
//!
//! The agent walks three tiers in order and never falls through once a tier yields
//! a move:
//!
//! 1. **Immediate win** - the first legal move (ascending index) that completes a line
//!    for the agent.
//! 2. **Immediate block** - the first legal move that the opponent would use to
//!    complete a line.
//! 3. **Weighted scoring** - every legal move is scored with the genome weights and a
//!    random move among the top scorers is returned.
//!
//! Because tiers 1 and 2 short-circuit, the `win` and `block` genes never change the
//! agent's choice; they stay in the genome so the weight vector keeps its shape.
//!
//! # Scoring
//!
//! ```text
//! score = positional
//!       + own_threats × fork
//!       + (own_threats ≥ 2 ? fork × 2 : 0)
//!       + (opponent_threats_after < opponent_threats_before ? block_fork : 0)
//!
//! positional = center | corner | side  (by cell position)
//! threats    = count_two_in_line(board, mark)
//! ```

use arrayvec::ArrayVec;
use rand::{RngCore, seq::IndexedRandom as _};
use triqui_engine::{Board, CELL_COUNT, CENTER, CORNERS, Mark, Outcome, SIDES};

use crate::{
    agent::Agent,
    genome::{Gene, Genome},
};

/// Counts lines holding exactly two `mark`s and one empty cell.
///
/// Each such line is an immediate threat: `mark` wins by filling the empty cell.
#[must_use]
pub fn count_two_in_line(board: &Board, mark: Mark) -> i32 {
    board
        .lines()
        .filter(|line| {
            let marks = line.iter().filter(|m| **m == mark).count();
            let empties = line.iter().filter(|m| m.is_empty()).count();
            marks == 2 && empties == 1
        })
        .map(|_| 1)
        .sum()
}

/// Returns the first legal move (ascending index) that makes `mark` win.
#[must_use]
pub fn winning_move(board: &Board, mark: Mark) -> Option<usize> {
    board.legal_moves().into_iter().find(|&index| {
        board
            .with_placed(mark, index)
            .is_ok_and(|after| after.winner() == Some(Outcome::Win(mark)))
    })
}

/// Agent choosing moves by immediate win, immediate block, then weighted score.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicAgent {
    genome: Genome,
}

impl HeuristicAgent {
    #[must_use]
    pub const fn new(genome: Genome) -> Self {
        Self { genome }
    }

    #[must_use]
    pub const fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Scores placing `mark` at `index` with the genome weights.
    ///
    /// Returns `None` if the placement is not legal.
    #[must_use]
    pub fn score_move(&self, board: &Board, mark: Mark, index: usize) -> Option<i32> {
        let after = board.with_placed(mark, index).ok()?;
        let weight = |gene| i32::from(self.genome.get(gene));

        let positional = if index == CENTER {
            weight(Gene::Center)
        } else if CORNERS.contains(&index) {
            weight(Gene::Corner)
        } else if SIDES.contains(&index) {
            weight(Gene::Side)
        } else {
            0
        };

        let own_threats = count_two_in_line(&after, mark);
        let mut score = positional + own_threats * weight(Gene::Fork);
        if own_threats >= 2 {
            score += weight(Gene::Fork) * 2;
        }

        let opponent = mark.opponent();
        if count_two_in_line(&after, opponent) < count_two_in_line(board, opponent) {
            score += weight(Gene::BlockFork);
        }

        Some(score)
    }

    fn best_scored_moves(&self, board: &Board, mark: Mark) -> ArrayVec<usize, CELL_COUNT> {
        let scored = board
            .legal_moves()
            .into_iter()
            .filter_map(|index| Some((index, self.score_move(board, mark, index)?)))
            .collect::<ArrayVec<_, CELL_COUNT>>();
        let Some(best) = scored.iter().map(|(_, score)| *score).max() else {
            return ArrayVec::new();
        };
        scored
            .into_iter()
            .filter(|(_, score)| *score == best)
            .map(|(index, _)| index)
            .collect()
    }
}

impl Agent for HeuristicAgent {
    fn choose_move(&self, board: &Board, mark: Mark, rng: &mut dyn RngCore) -> Option<usize> {
        if let Some(index) = winning_move(board, mark) {
            return Some(index);
        }
        if let Some(index) = winning_move(board, mark.opponent()) {
            return Some(index);
        }
        self.best_scored_moves(board, mark).choose(rng).copied()
    }
}
