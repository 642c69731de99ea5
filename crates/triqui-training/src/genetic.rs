//! Genetic algorithm building blocks: individuals, populations and the evolver.
//!
//! # Genetic Operators
//!
//! ## Tournament Selection
//!
//! Sample `tournament_size` individuals uniformly with replacement and keep the
//! fittest. Ties go to the first sampled candidate.
//!
//! ## Uniform Crossover
//!
//! Each gene comes from either parent with probability 0.5. See
//! [`weights::uniform_crossover`].
//!
//! ## Bounded Integer Mutation
//!
//! Each gene, with probability `mutation_probability`, moves by a uniform step in
//! `[-amplitude, amplitude]` and is clamped into range. See [`weights::mutate`].
//!
//! ## Elitism
//!
//! The `elite_count` fittest individuals are cloned unchanged into the next
//! generation before any offspring is bred. Their fitness is recomputed in the next
//! evaluation like everybody else's, since a single evaluation may have been lucky.
//!
//! # Parallelization
//!
//! [`Population::evaluate_fitness`] can evaluate every individual on its own scoped
//! thread. Each individual gets a private random stream seeded from the caller's
//! stream in population order, so parallel and sequential evaluation agree exactly.

use std::{panic, thread};

use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use triqui_evaluator::{
    fitness_evaluator::FitnessEvaluator, genome::Genome, simulator::SimulationError,
};

use crate::weights;

/// A candidate genome together with its last evaluated fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genome: Genome,
    fitness: f64,
}

impl Individual {
    /// Creates an unevaluated individual (fitness 0).
    #[must_use]
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            fitness: 0.0,
        }
    }

    /// Creates an individual with a random genome.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(weights::random(rng))
    }

    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Returns the fitness from the most recent evaluation.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[cfg(test)]
    fn with_fitness(mut self, fitness: f64) -> Self {
        self.fitness = fitness;
        self
    }

    fn evaluate(&mut self, evaluator: &FitnessEvaluator, seed: u64) -> Result<(), SimulationError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        self.fitness = evaluator.evaluate(&self.genome, &mut rng)?;
        Ok(())
    }
}

/// Minimum, maximum and mean fitness of a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// The individuals of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates a population of `count` random individuals.
    pub fn random<R>(count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count).map(|_| Individual::random(rng)).collect();
        Self { individuals }
    }

    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Evaluates fitness for every individual.
    ///
    /// One seed per individual is drawn from `rng` (in population order) before any
    /// evaluation starts. With `parallel`, every individual is evaluated on its own
    /// scoped thread.
    pub fn evaluate_fitness<R>(
        &mut self,
        evaluator: &FitnessEvaluator,
        rng: &mut R,
        parallel: bool,
    ) -> Result<(), SimulationError>
    where
        R: Rng + ?Sized,
    {
        let seeds = (0..self.individuals.len())
            .map(|_| rng.random::<u64>())
            .collect::<Vec<_>>();

        if !parallel {
            return self
                .individuals
                .iter_mut()
                .zip(seeds)
                .try_for_each(|(ind, seed)| ind.evaluate(evaluator, seed));
        }

        thread::scope(|s| {
            let handles = self
                .individuals
                .iter_mut()
                .zip(seeds)
                .map(|(ind, seed)| s.spawn(move || ind.evaluate(evaluator, seed)))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .try_for_each(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
        })
    }

    /// Returns the first individual with the highest fitness.
    #[must_use]
    pub fn best_individual(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .reduce(|best, ind| if ind.fitness > best.fitness { ind } else { best })
    }

    /// Computes fitness statistics, or `None` for an empty population.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fitness_stats(&self) -> Option<FitnessStats> {
        let first = self.individuals.first()?.fitness;
        let (min, max, sum) = self.individuals.iter().fold(
            (first, first, 0.0),
            |(min, max, sum), ind| (min.min(ind.fitness), max.max(ind.fitness), sum + ind.fitness),
        );
        Some(FitnessStats {
            min,
            max,
            mean: sum / self.individuals.len() as f64,
        })
    }
}

/// Breeds the next generation from an evaluated population.
#[derive(Debug, Clone)]
pub struct PopulationEvolver {
    /// Number of top individuals preserved unchanged (elitism)
    pub elite_count: usize,
    /// Tournament size for selection (larger = stronger selection pressure)
    pub tournament_size: usize,
    /// Probability of mutating each gene
    pub mutation_probability: f64,
    /// Largest per-mutation change of a gene
    pub mutation_amplitude: u8,
}

impl PopulationEvolver {
    /// Creates the next generation, the same size as `population`.
    ///
    /// 1. Ranks individuals by fitness, descending (stable, so ties keep population order)
    /// 2. Clones the top `elite_count` individuals unchanged
    /// 3. Fills the rest with children: two tournament-selected parents, uniform
    ///    crossover, then mutation
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let target = population.len();
        let mut ranked = population.individuals.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let mut next_individuals = Vec::with_capacity(target);
        next_individuals.extend(
            ranked
                .iter()
                .take(self.elite_count)
                .map(|ind| (*ind).clone()),
        );

        while next_individuals.len() < target {
            let p1 = tournament_select(&population.individuals, self.tournament_size, rng);
            let p2 = tournament_select(&population.individuals, self.tournament_size, rng);

            let mut child = weights::uniform_crossover(&p1.genome, &p2.genome, rng);
            weights::mutate(
                &mut child,
                self.mutation_probability,
                self.mutation_amplitude,
                rng,
            );

            next_individuals.push(Individual::new(child));
        }

        Population {
            individuals: next_individuals,
        }
    }
}

/// Selects an individual using tournament selection.
///
/// Samples `tournament_size` individuals with replacement and returns the one with
/// the highest fitness; the earliest sampled wins ties.
///
/// # Panics
///
/// Panics if `population` is empty or `tournament_size` is 0.
pub fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    (0..tournament_size)
        .filter_map(|_| population.choose(rng))
        .reduce(|best, candidate| {
            if candidate.fitness > best.fitness {
                candidate
            } else {
                best
            }
        })
        .expect("population must not be empty")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::{MUTATION_AMPLITUDE, ROUNDS_PER_EVALUATION, TOURNAMENT_SIZE};

    fn ranked_population(fitness: &[f64]) -> Population {
        let individuals = fitness
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let value = i32::try_from(i % 11).unwrap();
                Individual::new(Genome::from_values([value; 7])).with_fitness(*f)
            })
            .collect();
        Population::from_individuals(individuals)
    }

    fn evolver(elite_count: usize) -> PopulationEvolver {
        PopulationEvolver {
            elite_count,
            tournament_size: TOURNAMENT_SIZE,
            mutation_probability: 1.0,
            mutation_amplitude: MUTATION_AMPLITUDE,
        }
    }

    #[test]
    fn test_evolve_keeps_size() {
        let mut rng = Pcg32::seed_from_u64(0);
        let population = ranked_population(&[3.0, 1.0, 4.0, 1.5, 5.0, 9.0, 2.0]);
        for elite_count in 0..=population.len() {
            let next = evolver(elite_count).evolve(&population, &mut rng);
            assert_eq!(next.len(), population.len());
        }
    }

    #[test]
    fn test_evolve_preserves_elites() {
        let mut rng = Pcg32::seed_from_u64(1);
        let population = ranked_population(&[3.0, 1.0, 4.0, 1.5, 5.0, 9.0, 2.0]);
        let next = evolver(3).evolve(&population, &mut rng);
        let elites = next.individuals()[..3]
            .iter()
            .map(|ind| *ind.genome())
            .collect::<Vec<_>>();
        // fitness 9.0, 5.0, 4.0 sit at indices 5, 4, 2
        let expected = [5, 4, 2]
            .map(|i| *population.individuals()[i].genome())
            .to_vec();
        assert_eq!(elites, expected);
    }

    #[test]
    fn test_evolve_all_elites_copies_population() {
        let mut rng = Pcg32::seed_from_u64(2);
        let population = ranked_population(&[1.0, 2.0, 3.0]);
        let next = evolver(3).evolve(&population, &mut rng);
        let fitness = next
            .individuals()
            .iter()
            .map(Individual::fitness)
            .collect::<Vec<_>>();
        assert_eq!(fitness, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_elites_not_mutated_by_reference() {
        let mut rng = Pcg32::seed_from_u64(3);
        let population = ranked_population(&[1.0, 2.0, 3.0, 4.0]);
        let before = population.clone();
        let _next = evolver(2).evolve(&population, &mut rng);
        assert_eq!(population, before);
    }

    #[test]
    fn test_tournament_single_candidate_is_uniform() {
        let mut rng = Pcg32::seed_from_u64(4);
        let population = ranked_population(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut seen = [0; 5];
        for _ in 0..1000 {
            let winner = tournament_select(population.individuals(), 1, &mut rng);
            let index = population
                .individuals()
                .iter()
                .position(|ind| ind == winner)
                .unwrap();
            seen[index] += 1;
        }
        assert!(seen.iter().all(|count| *count > 100), "{seen:?}");
    }

    #[test]
    fn test_tournament_pressure() {
        let mut rng = Pcg32::seed_from_u64(5);
        let population = ranked_population(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        for _ in 0..100 {
            let winner = tournament_select(population.individuals(), 200, &mut rng);
            assert!((winner.fitness() - 5.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_tournament_never_picks_worst_of_three_distinct() {
        let mut rng = Pcg32::seed_from_u64(6);
        let population = ranked_population(&[1.0, 2.0]);
        let mut worst = 0;
        for _ in 0..4000 {
            let winner = tournament_select(population.individuals(), TOURNAMENT_SIZE, &mut rng);
            if winner.fitness() < 1.5 {
                worst += 1;
            }
        }
        // the worst only wins when all three samples are the worst: p = 1/8
        assert!((300..700).contains(&worst), "{worst}");
    }

    #[test]
    fn test_fitness_stats() {
        let population = ranked_population(&[2.0, 6.0, 4.0]);
        let stats = population.fitness_stats().unwrap();
        assert_eq!(
            stats,
            FitnessStats {
                min: 2.0,
                max: 6.0,
                mean: 4.0
            }
        );
        assert!(Population::from_individuals(vec![]).fitness_stats().is_none());
    }

    #[test]
    fn test_best_individual_first_on_tie() {
        let population = ranked_population(&[1.0, 7.0, 7.0]);
        let best = population.best_individual().unwrap();
        assert_eq!(best, &population.individuals()[1]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let evaluator = FitnessEvaluator::new(ROUNDS_PER_EVALUATION);
        let mut rng = Pcg32::seed_from_u64(7);
        let population = Population::random(12, &mut rng);

        let mut sequential = population.clone();
        sequential
            .evaluate_fitness(&evaluator, &mut Pcg32::seed_from_u64(8), false)
            .unwrap();
        let mut parallel = population;
        parallel
            .evaluate_fitness(&evaluator, &mut Pcg32::seed_from_u64(8), true)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    fn fitness_and_elites() -> impl Strategy<Value = (Vec<f64>, usize)> {
        proptest::collection::vec(0.0..48.0_f64, 1..24).prop_flat_map(|fitness| {
            let len = fitness.len();
            (Just(fitness), 0..=len)
        })
    }

    proptest! {
        #[test]
        fn test_evolve_leads_with_top_fitness(
            (fitness, elite_count) in fitness_and_elites(),
            seed: u64,
        ) {
            let population = ranked_population(&fitness);
            let mut rng = Pcg32::seed_from_u64(seed);
            let next = evolver(elite_count).evolve(&population, &mut rng);

            let mut order = (0..fitness.len()).collect::<Vec<_>>();
            order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
            let expected = order[..elite_count]
                .iter()
                .map(|&i| population.individuals()[i].clone())
                .collect::<Vec<_>>();

            prop_assert_eq!(next.len(), population.len());
            prop_assert_eq!(&next.individuals()[..elite_count], &expected[..]);
        }
    }
}
