//! Plays a full game between two agents.
//!
//! [`play_game`] resets the board, then alternates turns strictly between X and O
//! starting from the given mark. After every move the board is checked for a result;
//! the first non-empty result ends the game.
//!
//! An agent that returns no move, or returns an illegal move, is an internal error
//! (the game always ends before the board fills up), so it surfaces as a
//! [`SimulationError`] instead of being folded into a draw.

use rand::RngCore;
use triqui_engine::{Board, Mark, Outcome, PlaceError};

use crate::agent::Agent;

/// A broken invariant detected while simulating a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SimulationError {
    #[display("agent playing {mark} found no legal move on an unfinished board")]
    NoLegalMove { mark: Mark },
    #[display("agent playing {mark} chose an illegal move: {source}")]
    IllegalMove { mark: Mark, source: PlaceError },
    #[display("a game cannot start with the {mark} mark")]
    InvalidStartingMark { mark: Mark },
}

/// Plays one game on `board` and returns its outcome.
///
/// The board is reset first and holds the final position afterwards.
pub fn play_game(
    board: &mut Board,
    agent_x: &dyn Agent,
    agent_o: &dyn Agent,
    starting_mark: Mark,
    rng: &mut dyn RngCore,
) -> Result<Outcome, SimulationError> {
    if starting_mark.is_empty() {
        return Err(SimulationError::InvalidStartingMark {
            mark: starting_mark,
        });
    }

    board.reset();
    let mut mark = starting_mark;
    loop {
        let agent = if mark == Mark::X { agent_x } else { agent_o };
        let index = agent
            .choose_move(board, mark, rng)
            .ok_or(SimulationError::NoLegalMove { mark })?;
        board
            .place(mark, index)
            .map_err(|source| SimulationError::IllegalMove { mark, source })?;
        if let Some(outcome) = board.winner() {
            return Ok(outcome);
        }
        mark = mark.opponent();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::agent::RandomAgent;

    #[derive(Debug)]
    struct FixedAgent(Option<usize>);

    impl Agent for FixedAgent {
        fn choose_move(&self, _board: &Board, _mark: Mark, _rng: &mut dyn RngCore) -> Option<usize> {
            self.0
        }
    }

    #[test]
    fn test_random_games_terminate_with_result() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut board = Board::new();
        for _ in 0..1000 {
            let outcome =
                play_game(&mut board, &RandomAgent, &RandomAgent, Mark::X, &mut rng).unwrap();
            let moves = board.cells().iter().filter(|m| !m.is_empty()).count();
            assert!((5..=9).contains(&moves));
            assert_eq!(board.winner(), Some(outcome));
            assert!(matches!(
                outcome,
                Outcome::Win(Mark::X | Mark::O) | Outcome::Draw
            ));
        }
    }

    #[test]
    fn test_random_games_reproducible() {
        let run = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut board = Board::new();
            (0..10_000)
                .map(|_| {
                    play_game(&mut board, &RandomAgent, &RandomAgent, Mark::X, &mut rng).unwrap();
                    board
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }

    #[test]
    fn test_turns_alternate_from_starting_mark() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut board = Board::new();
        for _ in 0..200 {
            play_game(&mut board, &RandomAgent, &RandomAgent, Mark::O, &mut rng).unwrap();
            let count = |mark| board.cells().iter().filter(|m| **m == mark).count();
            let (xs, os) = (count(Mark::X), count(Mark::O));
            assert!(os == xs || os == xs + 1, "X={xs} O={os}");
        }
    }

    #[test]
    fn test_board_is_reset_before_play() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut board = Board::from_cells([Mark::O; 9]);
        let outcome =
            play_game(&mut board, &FixedAgent(Some(0)), &FixedAgent(Some(3)), Mark::X, &mut rng);
        // X plays 0, O plays 3, X plays 0 again
        assert_eq!(
            outcome,
            Err(SimulationError::IllegalMove {
                mark: Mark::X,
                source: PlaceError::Occupied { index: 0 },
            })
        );
        assert_eq!(board.cell(0), Some(Mark::X));
        assert_eq!(board.cell(3), Some(Mark::O));
        assert_eq!(board.legal_moves().len(), 7);
    }

    #[test]
    fn test_no_legal_move_is_an_error() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut board = Board::new();
        let result = play_game(&mut board, &FixedAgent(None), &RandomAgent, Mark::X, &mut rng);
        assert_eq!(result, Err(SimulationError::NoLegalMove { mark: Mark::X }));
    }

    #[test]
    fn test_empty_starting_mark_rejected() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut board = Board::new();
        let result = play_game(&mut board, &RandomAgent, &RandomAgent, Mark::Empty, &mut rng);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidStartingMark { .. })
        ));
    }
}
