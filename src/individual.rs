//! # Individual
//!
//! An `Individual` is one candidate solution: a fixed-length genome of binary genes
//! and the scalar fitness the last evaluation assigned to it.
//!
//! The genome length is fixed at creation. Reading or writing a gene beyond it is an
//! [`GeneticError::OutOfBounds`] error rather than a silent resize.
//!
//! ## Example
//!
//! ```rust
//! use gaze::individual::{Individual, UNEVALUATED};
//! use gaze::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let individual = Individual::random(16, &mut rng);
//!
//! assert_eq!(individual.genome_len(), 16);
//! assert_eq!(individual.fitness(), UNEVALUATED);
//! assert!(individual.genome().iter().all(|&gene| gene <= 1));
//! ```

use std::fmt;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A single gene. Genomes in this crate are binary, so genes are `0` or `1`.
pub type Gene = u8;

/// Fitness of an individual that has not been evaluated since it was created or changed.
pub const UNEVALUATED: f64 = -1.0;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genome: Vec<Gene>,
    fitness: f64,
}

impl Individual {
    /// Creates an individual with `length` genes, each set to 1 with probability 0.5.
    pub fn random(length: usize, rng: &mut RandomNumberGenerator) -> Self {
        let genome = (0..length).map(|_| Gene::from(rng.coin_flip())).collect();
        Self::from_genome(genome)
    }

    /// Wraps an existing genome. The individual starts unevaluated.
    pub fn from_genome(genome: Vec<Gene>) -> Self {
        Self {
            genome,
            fitness: UNEVALUATED,
        }
    }

    pub fn genome(&self) -> &[Gene] {
        &self.genome
    }

    pub fn genome_len(&self) -> usize {
        self.genome.len()
    }

    /// Returns the gene at `index`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `index` is not smaller than the genome length.
    pub fn gene(&self, index: usize) -> Result<Gene> {
        self.genome
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_bounds(index))
    }

    /// Overwrites the gene at `index`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `index` is not smaller than the genome length.
    pub fn set_gene(&mut self, index: usize, gene: Gene) -> Result<()> {
        let err = self.out_of_bounds(index);
        let slot = self.genome.get_mut(index).ok_or(err)?;
        *slot = gene;
        Ok(())
    }

    /// Complements the gene at `index` (0 becomes 1, anything else becomes 0).
    pub fn flip_gene(&mut self, index: usize) -> Result<()> {
        let gene = self.gene(index)?;
        self.set_gene(index, if gene == 1 { 0 } else { 1 })
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness != UNEVALUATED
    }

    /// Drops the stored fitness, marking the individual for re-evaluation.
    pub fn invalidate_fitness(&mut self) {
        self.fitness = UNEVALUATED;
    }

    fn out_of_bounds(&self, index: usize) -> GeneticError {
        GeneticError::OutOfBounds(format!(
            "gene index {} is outside a genome of length {}",
            index,
            self.genome.len()
        ))
    }
}

/// Renders the genome as a run of digits, e.g. `0110`.
impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gene in &self.genome {
            write!(f, "{}", gene)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_individual_has_binary_genes() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        for length in [0, 1, 7, 128] {
            let individual = Individual::random(length, &mut rng);
            assert_eq!(individual.genome_len(), length);
            assert!(individual.genome().iter().all(|&g| g == 0 || g == 1));
            assert!(!individual.is_evaluated());
        }
    }

    #[test]
    fn test_random_individual_is_roughly_balanced() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let individual = Individual::random(10_000, &mut rng);
        let ones = individual.genome().iter().filter(|&&g| g == 1).count();

        assert!((4_500..5_500).contains(&ones), "ones = {}", ones);
    }

    #[test]
    fn test_gene_access_is_bounds_checked() {
        let mut individual = Individual::from_genome(vec![0, 1, 0]);

        assert_eq!(individual.gene(1).unwrap(), 1);
        assert!(matches!(individual.gene(3), Err(GeneticError::OutOfBounds(_))));
        assert!(matches!(
            individual.set_gene(3, 1),
            Err(GeneticError::OutOfBounds(_))
        ));
        assert_eq!(individual.genome_len(), 3);

        individual.set_gene(0, 1).unwrap();
        assert_eq!(individual.genome(), &[1, 1, 0]);
    }

    #[test]
    fn test_flip_gene() {
        let mut individual = Individual::from_genome(vec![0, 1]);
        individual.flip_gene(0).unwrap();
        individual.flip_gene(1).unwrap();

        assert_eq!(individual.genome(), &[1, 0]);
    }

    #[test]
    fn test_fitness_lifecycle() {
        let mut individual = Individual::from_genome(vec![1]);
        assert_eq!(individual.fitness(), UNEVALUATED);

        individual.set_fitness(0.75);
        assert!(individual.is_evaluated());

        individual.invalidate_fitness();
        assert!(!individual.is_evaluated());
    }

    #[test]
    fn test_display() {
        let individual = Individual::from_genome(vec![1, 0, 1, 1]);
        assert_eq!(individual.to_string(), "1011");
    }
}
