//! # AllOnesChallenge
//!
//! The bit-counting problem: the fitness of a genome is the fraction of its genes
//! that are `1`, so the optimum is exactly `1.0`.
//!
//! ```rust
//! use gaze::all_ones::AllOnesChallenge;
//! use gaze::evolution::Challenge;
//! use gaze::individual::Individual;
//!
//! let individual = Individual::from_genome(vec![1, 0, 1, 1]);
//! assert_eq!(AllOnesChallenge.score(&individual).unwrap(), 0.75);
//! ```

use crate::error::{GeneticError, Result};
use crate::evolution::Challenge;
use crate::individual::Individual;

#[derive(Debug, Clone, Copy, Default)]
pub struct AllOnesChallenge;

impl Challenge for AllOnesChallenge {
    fn score(&self, individual: &Individual) -> Result<f64> {
        if individual.genome_len() == 0 {
            return Err(GeneticError::FitnessCalculation(
                "Cannot count ones in an empty genome".to_string(),
            ));
        }
        let ones = individual.genome().iter().filter(|&&gene| gene == 1).count();
        Ok(ones as f64 / individual.genome_len() as f64)
    }
}
