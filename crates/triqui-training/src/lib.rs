//! Training system for evolving heuristic weights using a genetic algorithm.
//!
//! This crate evolves the [`Genome`](triqui_evaluator::genome::Genome) weights used
//! by the heuristic agent. Fitness is the score an agent collects against the random
//! baseline, as computed by
//! [`FitnessEvaluator`](triqui_evaluator::fitness_evaluator::FitnessEvaluator).
//!
//! # How Training Works
//!
//! 1. **Population** - Create individuals with random genomes
//! 2. **Evaluation** - Each individual plays a fixed number of rounds against the random agent
//! 3. **Record** - Track the best individual ever seen and per-generation statistics
//! 4. **Selection** - Keep the elites, pick parents by tournament
//! 5. **Reproduction** - Breed the rest of the next generation by crossover and mutation
//! 6. **Repeat** - Continue for the configured number of generations
//!
//! # Architecture
//!
//! ```text
//! GeneticEngine (engine)
//!     ↓ evolves
//! Genomes (genetic::Individual)
//!     ↓ used by
//! HeuristicAgent (triqui-evaluator)
//!     ↓ scored by
//! FitnessEvaluator
//!     ↓ produces
//! Fitness
//!     ↓ guides
//! Selection & Reproduction (genetic::PopulationEvolver)
//! ```
//!
//! # Genetic Algorithm Parameters
//!
//! - **Population size** - Number of individuals per generation
//! - **Generation count** - Number of generations to run
//! - **Elite count** - Number of top individuals preserved unchanged
//! - **Mutation probability** - Per-gene chance of a bounded random step
//!
//! Tournament size, mutation amplitude and rounds per evaluation are fixed, see
//! [`config`].
//!
//! # Example
//!
//! ```
//! use triqui_training::{cancel::CancelToken, config::TrainingConfig, engine};
//!
//! let config = TrainingConfig::default()
//!     .with_population_size(8)
//!     .with_generation_count(3)
//!     .with_elite_count(2)
//!     .with_seed(1);
//! let outcome = engine::train(config, (), &CancelToken::new())?;
//!
//! assert_eq!(outcome.history.len(), 3);
//! let best = outcome.best.expect("at least one generation ran");
//! println!("best {} with fitness {}", best.genome(), best.fitness());
//! # Ok::<(), triqui_training::engine::TrainingError>(())
//! ```

pub mod cancel;
pub mod config;
pub mod engine;
pub mod genetic;
pub mod observer;
pub mod weights;
