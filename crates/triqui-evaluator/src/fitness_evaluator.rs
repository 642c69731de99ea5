//! Fitness evaluation: scoring a genome by play against the random baseline.
//!
//! # How It Works
//!
//! For each round, two games are played on a single reused board:
//!
//! 1. Heuristic as X against random as O, X starts.
//! 2. Random as X against heuristic as O, X (the random agent) starts.
//!
//! Each game is scored from the heuristic agent's perspective:
//!
//! ```text
//! win = 3 points, draw = 1 point, loss = 0 points
//! fitness = Σ points over 2 × rounds games
//! ```
//!
//! The total is not averaged. Fitness values are only ever compared within a single
//! generation, where every individual plays the same number of rounds.
//!
//! Fitness is stochastic: it depends on the random opponent and on the heuristic's
//! tie-breaks. Re-evaluating the same genome gives a different value in general.

use rand::RngCore;
use triqui_engine::{Board, Mark, Outcome};

use crate::{
    agent::RandomAgent,
    genome::Genome,
    heuristic_agent::HeuristicAgent,
    simulator::{self, SimulationError},
};

pub const WIN_POINTS: u32 = 3;
pub const DRAW_POINTS: u32 = 1;

/// Win/draw/loss counts from one player's perspective.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchTally {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl MatchTally {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    /// Records `outcome` as seen by the player holding `perspective`.
    pub fn record(&mut self, outcome: Outcome, perspective: Mark) {
        match outcome.winner() {
            None => self.draws += 1,
            Some(mark) if mark == perspective => self.wins += 1,
            Some(_) => self.losses += 1,
        }
    }

    #[must_use]
    pub const fn games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    #[must_use]
    pub const fn points(&self) -> u32 {
        // losses score nothing
        self.wins * WIN_POINTS + self.draws * DRAW_POINTS
    }
}

/// Plays a heuristic agent against [`RandomAgent`] for a fixed number of rounds.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator {
    rounds: usize,
}

impl FitnessEvaluator {
    /// Creates an evaluator playing `rounds` rounds (two games each).
    #[must_use]
    pub const fn new(rounds: usize) -> Self {
        Self { rounds }
    }

    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// Plays all rounds for `genome` and returns the heuristic agent's tally.
    pub fn play_rounds(
        &self,
        genome: &Genome,
        rng: &mut dyn RngCore,
    ) -> Result<MatchTally, SimulationError> {
        let heuristic = HeuristicAgent::new(*genome);
        let random = RandomAgent::new();
        let mut board = Board::new();
        let mut tally = MatchTally::new();

        for _ in 0..self.rounds {
            let outcome = simulator::play_game(&mut board, &heuristic, &random, Mark::X, rng)?;
            tally.record(outcome, Mark::X);
            let outcome = simulator::play_game(&mut board, &random, &heuristic, Mark::X, rng)?;
            tally.record(outcome, Mark::O);
        }

        Ok(tally)
    }

    /// Returns the total points `genome` scores over all rounds.
    pub fn evaluate(&self, genome: &Genome, rng: &mut dyn RngCore) -> Result<f64, SimulationError> {
        let tally = self.play_rounds(genome, rng)?;
        Ok(f64::from(tally.points()))
    }
}
