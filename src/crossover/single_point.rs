use super::{check_lengths, CrossoverOperator};
use crate::{error::Result, individual::Individual, rng::RandomNumberGenerator};

/// # SinglePointCrossover
///
/// Draws a cut point uniformly in `[0, genome_length]`. The offspring takes
/// `parent1`'s genes before the cut and `parent2`'s genes at and after it, so a cut
/// at 0 copies `parent2` and a cut at the genome length copies `parent1`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct SinglePointCrossover;

impl SinglePointCrossover {
    pub fn new() -> Self {
        Self
    }

    /// Splices the two genomes at `swap_point`.
    fn splice(parent1: &Individual, parent2: &Individual, swap_point: usize) -> Individual {
        let swap_point = swap_point.min(parent1.genome_len());
        let mut genome = Vec::with_capacity(parent1.genome_len());
        genome.extend_from_slice(&parent1.genome()[..swap_point]);
        genome.extend_from_slice(&parent2.genome()[swap_point..]);
        Individual::from_genome(genome)
    }
}

impl CrossoverOperator for SinglePointCrossover {
    fn recombine(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Individual> {
        let length = check_lengths(parent1, parent2)?;
        let swap_point = rng.index(length + 1);
        Ok(Self::splice(parent1, parent2, swap_point))
    }
}
