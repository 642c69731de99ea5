//! Genome operators for the genetic algorithm.
//!
//! These are the building blocks used by
//! [`genetic::PopulationEvolver`](crate::genetic::PopulationEvolver):
//!
//! - **Initialization**: [`random`] samples a fresh genome
//! - **Crossover**: [`uniform_crossover`] mixes two parents gene by gene
//! - **Mutation**: [`mutate`] nudges genes by a bounded integer step
//!
//! Every operator returns genes in `[GENE_MIN, GENE_MAX]`: [`Genome::set`] clamps.

use rand::Rng;
use triqui_evaluator::genome::{GENE_MAX, GENE_MIN, Gene, Genome};

/// Lower bound for the `win` and `block` genes of a fresh genome.
pub const DECISIVE_GENE_MIN: u8 = 5;

/// Samples a random genome for the initial population.
///
/// `win` and `block` are drawn from `[DECISIVE_GENE_MIN, GENE_MAX]`, the other genes
/// from `[GENE_MIN, GENE_MAX]`.
pub fn random<R>(rng: &mut R) -> Genome
where
    R: Rng + ?Sized,
{
    let mut genome = Genome::DEFAULT_PRESET;
    for gene in Gene::ALL {
        let min = match gene {
            Gene::Win | Gene::Block => DECISIVE_GENE_MIN,
            _ => GENE_MIN,
        };
        genome.set(gene, rng.random_range(min..=GENE_MAX).into());
    }
    genome
}

/// Creates a child taking each gene from `p1` or `p2` with equal probability.
pub fn uniform_crossover<R>(p1: &Genome, p2: &Genome, rng: &mut R) -> Genome
where
    R: Rng + ?Sized,
{
    let mut child = *p1;
    for gene in Gene::ALL {
        if rng.random_bool(0.5) {
            child.set(gene, p2.get(gene).into());
        }
    }
    child
}

/// Mutates `genome` in place.
///
/// Each gene independently, with probability `probability`, gets a uniform integer
/// step from `[-amplitude, amplitude]` added and is clamped back into range.
///
/// # Panics
///
/// Panics if `probability` is outside `[0.0, 1.0]`.
pub fn mutate<R>(genome: &mut Genome, probability: f64, amplitude: u8, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let amplitude = i32::from(amplitude);
    for gene in Gene::ALL {
        if rng.random_bool(probability) {
            let step = rng.random_range(-amplitude..=amplitude);
            genome.set(gene, i32::from(genome.get(gene)) + step);
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::config::MUTATION_AMPLITUDE;

    fn genome_strategy() -> impl Strategy<Value = Genome> {
        proptest::array::uniform7(0..=10_i32).prop_map(Genome::from_values)
    }

    #[test]
    fn test_random_respects_ranges() {
        let mut rng = Pcg32::seed_from_u64(0);
        for _ in 0..1000 {
            let genome = random(&mut rng);
            for (gene, value) in genome.iter() {
                let min = match gene {
                    Gene::Win | Gene::Block => DECISIVE_GENE_MIN,
                    _ => GENE_MIN,
                };
                assert!((min..=GENE_MAX).contains(&value), "{gene}={value}");
            }
        }
    }

    #[test]
    fn test_mutate_zero_probability_is_identity() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut genome = Genome::DEFAULT_PRESET;
        mutate(&mut genome, 0.0, MUTATION_AMPLITUDE, &mut rng);
        assert_eq!(genome, Genome::DEFAULT_PRESET);
    }

    #[test]
    fn test_mutate_step_bounded_by_amplitude() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..1000 {
            let mut genome = Genome::DEFAULT_PRESET;
            mutate(&mut genome, 1.0, MUTATION_AMPLITUDE, &mut rng);
            for (before, after) in Genome::DEFAULT_PRESET.values().iter().zip(genome.values()) {
                assert!(before.abs_diff(after) <= MUTATION_AMPLITUDE);
            }
        }
    }

    #[test]
    fn test_crossover_mixes_both_parents() {
        let mut rng = Pcg32::seed_from_u64(3);
        let zeros = Genome::from_values([0; 7]);
        let tens = Genome::from_values([10; 7]);
        let mut from_p1 = 0;
        let mut from_p2 = 0;
        for _ in 0..200 {
            let child = uniform_crossover(&zeros, &tens, &mut rng);
            for value in child.values() {
                match value {
                    0 => from_p1 += 1,
                    10 => from_p2 += 1,
                    _ => panic!("unexpected gene value {value}"),
                }
            }
        }
        // 1400 coin flips, both sides well represented
        assert!(from_p1 > 500 && from_p2 > 500, "{from_p1} / {from_p2}");
    }

    proptest! {
        #[test]
        fn test_mutate_keeps_genes_in_range(
            genome in genome_strategy(),
            probability in 0.0..=1.0_f64,
            amplitude in 0..=20_u8,
            seed: u64,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut genome = genome;
            mutate(&mut genome, probability, amplitude, &mut rng);
            for value in genome.values() {
                prop_assert!((GENE_MIN..=GENE_MAX).contains(&value));
            }
        }

        #[test]
        fn test_crossover_genes_come_from_parents(
            p1 in genome_strategy(),
            p2 in genome_strategy(),
            seed: u64,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let child = uniform_crossover(&p1, &p2, &mut rng);
            for gene in Gene::ALL {
                let value = child.get(gene);
                prop_assert!(value == p1.get(gene) || value == p2.get(gene));
            }
        }
    }
}
