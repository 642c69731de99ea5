//! Training run configuration.
//!
//! [`TrainingConfig`] holds the parameters a caller chooses for a run. Operator
//! parameters that are fixed by design are exposed as constants.

use serde::{Deserialize, Serialize};

/// Largest change a single mutation applies to a gene, in either direction.
pub const MUTATION_AMPLITUDE: u8 = 3;

/// Number of candidates sampled per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// Rounds (two games each) played to evaluate one individual.
pub const ROUNDS_PER_EVALUATION: usize = 8;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("generation count must be at least 1")]
    NoGenerations,
    #[display("elite count {elite_count} exceeds population size {population_size}")]
    EliteCountTooLarge {
        elite_count: usize,
        population_size: usize,
    },
    #[display("mutation probability {value} is outside [0, 1]")]
    InvalidMutationProbability { value: f64 },
}

/// Parameters of a training run.
///
/// # Defaults
///
/// ```
/// use triqui_training::config::TrainingConfig;
///
/// let config = TrainingConfig::default();
/// assert_eq!(config.population_size, 80);
/// assert_eq!(config.generation_count, 150);
/// assert_eq!(config.elite_count, 12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use triqui_training::config::TrainingConfig;
///
/// let config = TrainingConfig::default()
///     .with_population_size(20)
///     .with_generation_count(10)
///     .with_elite_count(2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of individuals per generation.
    pub population_size: usize,
    /// Number of generations to run.
    pub generation_count: usize,
    /// Per-gene mutation probability (0.0–1.0).
    pub mutation_probability: f64,
    /// Number of top individuals carried unchanged into the next generation.
    pub elite_count: usize,
    /// Seed of the run's random stream. `None` draws one from the OS-seeded generator.
    pub seed: Option<u64>,
    /// Evaluate individuals of a generation on separate threads.
    ///
    /// Results do not depend on this flag: each individual gets its own random stream
    /// seeded from the run's stream.
    pub parallel: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: 80,
            generation_count: 150,
            mutation_probability: 0.1,
            elite_count: 12,
            seed: None,
            parallel: true,
        }
    }
}

impl TrainingConfig {
    #[must_use]
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    #[must_use]
    pub fn with_generation_count(mut self, n: usize) -> Self {
        self.generation_count = n;
        self
    }

    #[must_use]
    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    #[must_use]
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.generation_count == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.elite_count > self.population_size {
            return Err(ConfigError::EliteCountTooLarge {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ConfigError::InvalidMutationProbability {
                value: self.mutation_probability,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.population_size, 80);
        assert_eq!(config.generation_count, 150);
        assert!((config.mutation_probability - 0.1).abs() < 1e-12);
        assert_eq!(config.elite_count, 12);
        assert!(config.seed.is_none());
        assert!(config.parallel);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_population() {
        let config = TrainingConfig::default()
            .with_population_size(0)
            .with_elite_count(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation));
    }

    #[test]
    fn test_validate_rejects_zero_generations() {
        let config = TrainingConfig::default().with_generation_count(0);
        assert_eq!(config.validate(), Err(ConfigError::NoGenerations));
    }

    #[test]
    fn test_validate_elite_bounds() {
        let config = TrainingConfig::default()
            .with_population_size(10)
            .with_elite_count(11);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EliteCountTooLarge {
                elite_count: 11,
                population_size: 10
            })
        );

        // every individual may be an elite
        let config = config.with_elite_count(10);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_mutation_probability() {
        for value in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let config = TrainingConfig::default().with_mutation_probability(value);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidMutationProbability { .. })
            ));
        }
        for value in [0.0, 0.5, 1.0] {
            let config = TrainingConfig::default().with_mutation_probability(value);
            assert_eq!(config.validate(), Ok(()));
        }
    }
}
