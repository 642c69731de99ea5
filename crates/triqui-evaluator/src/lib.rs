//! Agents, game simulation and fitness evaluation for Triqui.
//!
//! This crate implements the three levels that turn a weight vector into a fitness
//! score:
//!
//! 1. **Move Selection** ([`agent`], [`heuristic_agent`]) - An [`Agent`](agent::Agent)
//!    picks a cell for a board and a mark. [`RandomAgent`](agent::RandomAgent) is the
//!    baseline opponent, [`HeuristicAgent`](heuristic_agent::HeuristicAgent) is the
//!    agent under training, driven by a [`Genome`](genome::Genome).
//!
//! 2. **Game Simulation** ([`simulator`]) - Plays one full game between two agents.
//!
//! 3. **Fitness Evaluation** ([`fitness_evaluator`]) - Plays a fixed number of rounds of
//!    the heuristic agent against the random baseline and converts outcomes to points.
//!
//! # Architecture
//!
//! ```text
//! Fitness Evaluation (score a genome)
//!     ↓ uses
//! Game Simulation (play one game)
//!     ↓ uses
//! Move Selection (pick one cell)
//! ```
//!
//! # Randomness
//!
//! Nothing in this crate owns a random number generator. Every operation that needs
//! randomness takes `&mut dyn RngCore`, so a caller holding a seeded generator gets
//! fully reproducible games.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand::rngs::StdRng;
//! use triqui_evaluator::{fitness_evaluator::FitnessEvaluator, genome::Genome};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let evaluator = FitnessEvaluator::new(8);
//! let fitness = evaluator.evaluate(&Genome::DEFAULT_PRESET, &mut rng).unwrap();
//! assert!(fitness <= 48.0);
//! ```

pub mod agent;
pub mod fitness_evaluator;
pub mod genome;
pub mod heuristic_agent;
pub mod simulator;
