use super::{check_lengths, CrossoverOperator};
use crate::{error::Result, individual::Individual, rng::RandomNumberGenerator};

/// # UniformCrossover
///
/// Each offspring gene is taken from `parent1` or `parent2` with equal probability,
/// independently per position.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct UniformCrossover;

impl UniformCrossover {
    pub fn new() -> Self {
        Self
    }
}

impl CrossoverOperator for UniformCrossover {
    fn recombine(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Individual> {
        check_lengths(parent1, parent2)?;

        let genome = parent1
            .genome()
            .iter()
            .zip(parent2.genome())
            .map(|(&a, &b)| if rng.coin_flip() { a } else { b })
            .collect();

        Ok(Individual::from_genome(genome))
    }
}
