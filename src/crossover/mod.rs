//! # CrossoverOperator
//!
//! The `CrossoverOperator` trait defines how two parents recombine into one offspring.
//! Offspring are always fresh individuals: parents are only read, and the offspring
//! starts unevaluated.
pub mod single_point;
pub mod uniform;

use std::fmt::Debug;

use crate::{
    error::{GeneticError, Result},
    individual::Individual,
    rng::RandomNumberGenerator,
};

/// # CrossoverOperator
///
/// Recombines the genomes of two parents of equal genome length.
pub trait CrossoverOperator
where
    Self: Debug + Clone + Send + Sync,
{
    /// Produces one offspring from `parent1` and `parent2`.
    ///
    /// ## Errors
    ///
    /// Returns `Configuration` if the parents' genome lengths differ.
    fn recombine(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Individual>;
}

pub(crate) fn check_lengths(parent1: &Individual, parent2: &Individual) -> Result<usize> {
    if parent1.genome_len() != parent2.genome_len() {
        return Err(GeneticError::Configuration(format!(
            "Cannot recombine genomes of length {} and {}",
            parent1.genome_len(),
            parent2.genome_len()
        )));
    }
    Ok(parent1.genome_len())
}

pub use single_point::SinglePointCrossover;
pub use uniform::UniformCrossover;
