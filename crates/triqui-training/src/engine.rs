//! The generational training loop.
//!
//! ```text
//! init ─→ [yield] ─→ evaluate ─→ record ─→ notify ─→ reproduce ─┐
//!              ↑                                                │
//!              └────────────── next generation ─────────────────┘
//! ```
//!
//! Reproduction is skipped after the last generation. Cancellation is checked right
//! after the yield hook, so a run never stops halfway through a generation.

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use triqui_evaluator::{fitness_evaluator::FitnessEvaluator, simulator::SimulationError};

use crate::{
    cancel::CancelToken,
    config::{
        ConfigError, MUTATION_AMPLITUDE, ROUNDS_PER_EVALUATION, TOURNAMENT_SIZE, TrainingConfig,
    },
    genetic::{Individual, Population, PopulationEvolver},
    observer::{GenerationEvent, TrainingObserver},
};

/// Per-generation snapshot appended to the run history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// 1-based generation index.
    pub generation: usize,
    /// Best fitness seen in this or any earlier generation.
    pub best_fitness: f64,
    /// Mean fitness of this generation's population.
    pub average_fitness: f64,
    pub min_fitness: f64,
    pub max_fitness: f64,
}

/// Failure of a training run.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingError {
    #[display("invalid training configuration: {_0}")]
    Config(ConfigError),
    #[display("game simulation failed: {_0}")]
    Simulation(SimulationError),
}

/// Result of a finished or cancelled run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Best individual of the whole run, with the fitness it scored when found.
    ///
    /// `None` only when the run was cancelled before its first evaluation.
    pub best: Option<Individual>,
    pub history: Vec<TrainingRecord>,
    pub generations_run: usize,
    pub cancelled: bool,
    /// Population of the last evaluated generation.
    pub final_population: Population,
}

/// Runs the genetic algorithm described by a [`TrainingConfig`].
#[derive(Debug)]
pub struct GeneticEngine {
    config: TrainingConfig,
    evaluator: FitnessEvaluator,
    evolver: PopulationEvolver,
    rng: Pcg32,
}

impl GeneticEngine {
    /// Validates `config` and seeds the run's random stream.
    pub fn new(config: TrainingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let evolver = PopulationEvolver {
            elite_count: config.elite_count,
            tournament_size: TOURNAMENT_SIZE,
            mutation_probability: config.mutation_probability,
            mutation_amplitude: MUTATION_AMPLITUDE,
        };
        Ok(Self {
            config,
            evaluator: FitnessEvaluator::new(ROUNDS_PER_EVALUATION),
            evolver,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Runs all generations, or until `cancel` is set.
    ///
    /// Cancellation is not an error: the outcome carries the best individual found so
    /// far with `cancelled` set.
    pub fn run<O>(
        &mut self,
        mut observer: O,
        cancel: &CancelToken,
    ) -> Result<TrainingOutcome, SimulationError>
    where
        O: TrainingObserver,
    {
        let generation_count = self.config.generation_count;
        let mut population = Population::random(self.config.population_size, &mut self.rng);
        let mut best: Option<Individual> = None;
        let mut history = Vec::with_capacity(generation_count);
        let mut cancelled = false;

        for generation in 1..=generation_count {
            observer.before_generation();
            if cancel.is_cancelled() {
                tracing::info!(generation, "training cancelled");
                cancelled = true;
                break;
            }

            population.evaluate_fitness(&self.evaluator, &mut self.rng, self.config.parallel)?;

            if let Some(candidate) = population.best_individual()
                && best.as_ref().is_none_or(|b| candidate.fitness() > b.fitness())
            {
                tracing::info!(
                    generation,
                    fitness = candidate.fitness(),
                    genome = %candidate.genome(),
                    "new best individual"
                );
                best = Some(candidate.clone());
            }
            let Some(best_ever) = &best else {
                unreachable!("population is never empty after validation")
            };

            let Some(stats) = population.fitness_stats() else {
                unreachable!("population is never empty after validation")
            };
            let record = TrainingRecord {
                generation,
                best_fitness: best_ever.fitness(),
                average_fitness: stats.mean,
                min_fitness: stats.min,
                max_fitness: stats.max,
            };
            tracing::debug!(
                generation,
                best = record.best_fitness,
                average = record.average_fitness,
                min = record.min_fitness,
                max = record.max_fitness,
                "generation evaluated"
            );
            history.push(record);
            observer.generation_completed(&GenerationEvent {
                record,
                best_genome: *best_ever.genome(),
            });

            if generation < generation_count {
                population = self.evolver.evolve(&population, &mut self.rng);
            }
        }

        Ok(TrainingOutcome {
            best,
            generations_run: history.len(),
            history,
            cancelled,
            final_population: population,
        })
    }
}

/// Validates `config` and runs a full training.
pub fn train<O>(
    config: TrainingConfig,
    observer: O,
    cancel: &CancelToken,
) -> Result<TrainingOutcome, TrainingError>
where
    O: TrainingObserver,
{
    let mut engine = GeneticEngine::new(config)?;
    Ok(engine.run(observer, cancel)?)
}
