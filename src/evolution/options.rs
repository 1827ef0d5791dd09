//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the hyperparameters of a genetic algorithm run:
//! population size, mutation and crossover rates, elitism, the termination rule,
//! the progress logging level and the threshold above which evaluation runs in parallel.
//!
//! ## Example
//!
//! ```rust
//! use gaze::evolution::{EvolutionOptions, LogLevel, Termination};
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(200)
//!     .mutation_rate(0.05)
//!     .crossover_rate(0.9)
//!     .elitism_count(2)
//!     .termination(Termination::max_generations(1000))
//!     .log_level(LogLevel::Minimal)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.get_population_size(), 200);
//!
//! // Rates outside [0, 1] are rejected.
//! assert!(EvolutionOptions::builder().mutation_rate(1.5).build().is_err());
//! ```
//!
//! ## Elitism
//!
//! Ranks `0..elitism_count` are elite: they are copied into the next generation
//! without crossover and are never mutated.

use super::termination::Termination;
use crate::error::{GeneticError, Result};

/// Controls the per-generation progress reports emitted through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Reports the best fitness and the fittest genome every generation.
    Verbose,
    /// Reports the best fitness every generation.
    Minimal,
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    population_size: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    elitism_count: usize,
    termination: Termination,
    log_level: LogLevel,
    /// Minimum population size evaluated in parallel
    parallel_threshold: usize,
}

impl EvolutionOptions {
    /// Creates validated options with the default termination, log level and
    /// parallel threshold.
    pub fn new(
        population_size: usize,
        mutation_rate: f64,
        crossover_rate: f64,
        elitism_count: usize,
    ) -> Result<Self> {
        Self::builder()
            .population_size(population_size)
            .mutation_rate(mutation_rate)
            .crossover_rate(crossover_rate)
            .elitism_count(elitism_count)
            .build()
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_elitism_count(&self) -> usize {
        self.elitism_count
    }

    pub fn get_termination(&self) -> &Termination {
        &self.termination
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Returns the minimum population size evaluated in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// True if `rank` is inside the elite band.
    pub fn is_elite(&self, rank: usize) -> bool {
        rank < self.elitism_count
    }

    /// Checks every invariant the operators rely on.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        check_rate("Mutation rate", self.mutation_rate)?;
        check_rate("Crossover rate", self.crossover_rate)?;
        if self.elitism_count > self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Elitism count ({}) exceeds population size ({})",
                self.elitism_count, self.population_size
            )));
        }
        self.termination.validate()
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

fn check_rate(name: &str, rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(GeneticError::Configuration(format!(
            "{} must be within [0, 1], got {}",
            name, rate
        )));
    }
    Ok(())
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.01,
            crossover_rate: 0.95,
            elitism_count: 2,
            termination: Termination::default(),
            log_level: LogLevel::None,
            parallel_threshold: 1000, // Default parallel threshold
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
/// Unset fields take the values of `EvolutionOptions::default()`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    mutation_rate: Option<f64>,
    crossover_rate: Option<f64>,
    elitism_count: Option<usize>,
    termination: Option<Termination>,
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn elitism_count(mut self, value: usize) -> Self {
        self.elitism_count = Some(value);
        self
    }

    pub fn termination(mut self, value: Termination) -> Self {
        self.termination = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds and validates the `EvolutionOptions` instance.
    pub fn build(self) -> Result<EvolutionOptions> {
        let defaults = EvolutionOptions::default();
        let options = EvolutionOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            crossover_rate: self.crossover_rate.unwrap_or(defaults.crossover_rate),
            elitism_count: self.elitism_count.unwrap_or(defaults.elitism_count),
            termination: self.termination.unwrap_or(defaults.termination),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            parallel_threshold: self.parallel_threshold.unwrap_or(defaults.parallel_threshold),
        };
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EvolutionOptions::default().validate().is_ok());
        let built = EvolutionOptions::builder().build().unwrap();
        assert_eq!(built, EvolutionOptions::default());
    }

    #[test]
    fn test_new() {
        let options = EvolutionOptions::new(200, 0.05, 0.9, 2).unwrap();

        assert_eq!(options.get_population_size(), 200);
        assert_eq!(options.get_mutation_rate(), 0.05);
        assert_eq!(options.get_crossover_rate(), 0.9);
        assert_eq!(options.get_elitism_count(), 2);
        assert_eq!(options.get_log_level(), LogLevel::None);
    }

    #[test]
    fn test_zero_population_rejected() {
        match EvolutionOptions::new(0, 0.1, 0.9, 0) {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_rates_must_be_probabilities() {
        assert!(EvolutionOptions::new(10, -0.1, 0.9, 0).is_err());
        assert!(EvolutionOptions::new(10, 0.1, 1.1, 0).is_err());
        assert!(EvolutionOptions::new(10, f64::NAN, 0.9, 0).is_err());
        assert!(EvolutionOptions::new(10, 0.0, 1.0, 0).is_ok());
    }

    #[test]
    fn test_elitism_cannot_exceed_population() {
        assert!(EvolutionOptions::new(3, 0.1, 0.9, 4).is_err());
        assert!(EvolutionOptions::new(3, 0.1, 0.9, 3).is_ok());
    }

    #[test]
    fn test_elite_band_is_exclusive() {
        let options = EvolutionOptions::new(10, 0.1, 0.9, 2).unwrap();

        assert!(options.is_elite(0));
        assert!(options.is_elite(1));
        assert!(!options.is_elite(2));
    }

    #[test]
    fn test_builder_overrides() {
        let options = EvolutionOptions::builder()
            .termination(Termination::target_fitness(1.0))
            .log_level(LogLevel::Verbose)
            .parallel_threshold(16)
            .build()
            .unwrap();

        assert_eq!(options.get_termination().get_target_fitness(), Some(1.0));
        assert_eq!(options.get_log_level(), LogLevel::Verbose);
        assert_eq!(options.get_parallel_threshold(), 16);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_from_json() {
        let options = EvolutionOptions::builder()
            .population_size(200)
            .termination(Termination::target_fitness(29.0).or_max_generations(1000))
            .build()
            .unwrap();

        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"population_size\":200"));
        let parsed: EvolutionOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get_population_size(), 200);
        assert_eq!(parsed.get_termination().get_target_fitness(), Some(29.0));
        assert_eq!(parsed.get_termination().get_max_generations(), Some(1000));
    }
}
