//! # Termination
//!
//! A `Termination` decides when the generational loop stops. Two policies are
//! available and may be combined with OR semantics:
//!
//! - **fitness threshold**: stop once any individual's fitness reaches the target,
//!   compared with an explicit epsilon (`fitness >= target - epsilon`) instead of
//!   exact floating-point equality;
//! - **generation cap**: stop once the generation counter exceeds the maximum.
//!
//! ## Example
//!
//! ```rust
//! use gaze::evolution::Termination;
//!
//! let termination = Termination::target_fitness(1.0).or_max_generations(500);
//!
//! assert!(!termination.generation_limit_reached(500));
//! assert!(termination.generation_limit_reached(501));
//! ```

use crate::error::{GeneticError, Result};
use crate::population::Population;

/// Default tolerance used when comparing fitness against the target.
pub const DEFAULT_EPSILON: f64 = 1e-9;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Termination {
    target_fitness: Option<f64>,
    max_generations: Option<usize>,
    epsilon: f64,
}

impl Termination {
    /// Stops when any individual's fitness reaches `target`.
    pub fn target_fitness(target: f64) -> Self {
        Self {
            target_fitness: Some(target),
            max_generations: None,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Stops once the generation counter exceeds `max_generations`.
    pub fn max_generations(max_generations: usize) -> Self {
        Self {
            target_fitness: None,
            max_generations: Some(max_generations),
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Adds a fitness target to this termination.
    pub fn or_target_fitness(mut self, target: f64) -> Self {
        self.target_fitness = Some(target);
        self
    }

    /// Adds a generation cap to this termination.
    pub fn or_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = Some(max_generations);
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn get_target_fitness(&self) -> Option<f64> {
        self.target_fitness
    }

    pub fn get_max_generations(&self) -> Option<usize> {
        self.max_generations
    }

    pub fn get_epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Checks that at least one policy is configured and the numbers are usable.
    pub fn validate(&self) -> Result<()> {
        if self.target_fitness.is_none() && self.max_generations.is_none() {
            return Err(GeneticError::Configuration(
                "Termination needs a target fitness, a generation cap, or both".to_string(),
            ));
        }
        if let Some(target) = self.target_fitness {
            if !target.is_finite() {
                return Err(GeneticError::Configuration(format!(
                    "Target fitness must be finite, got {}",
                    target
                )));
            }
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Termination epsilon must be a non-negative finite number, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    /// True if `fitness` reaches the target within epsilon.
    pub fn is_target_reached(&self, fitness: f64) -> bool {
        self.target_fitness
            .is_some_and(|target| fitness >= target - self.epsilon)
    }

    /// True once `generation` exceeds the cap.
    pub fn generation_limit_reached(&self, generation: usize) -> bool {
        self.max_generations
            .is_some_and(|max_generations| generation > max_generations)
    }

    /// Evaluates both policies against an evaluated population.
    pub fn is_met(&self, population: &Population, generation: usize) -> bool {
        self.generation_limit_reached(generation)
            || population
                .individuals()
                .iter()
                .any(|individual| self.is_target_reached(individual.fitness()))
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self::max_generations(1000)
    }
}
