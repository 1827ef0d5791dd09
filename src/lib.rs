//! # gaze
//!
//! A generational genetic algorithm over fixed-length binary genomes, with two
//! ready-made problems: the bit-counting [`all_ones`] challenge and a [`maze`]
//! whose robot controller is encoded in the genome.
//!
//! ```rust
//! use gaze::all_ones::AllOnesChallenge;
//! use gaze::crossover::UniformCrossover;
//! use gaze::evolution::{EvolutionLauncher, EvolutionOptions, GeneticAlgorithm, Termination};
//! use gaze::rng::RandomNumberGenerator;
//! use gaze::selection::RouletteWheelSelection;
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(50)
//!     .termination(Termination::target_fitness(1.0).or_max_generations(500))
//!     .build()?;
//! let algorithm = GeneticAlgorithm::new(
//!     options,
//!     RouletteWheelSelection::new(),
//!     UniformCrossover::new(),
//! )?;
//! let launcher = EvolutionLauncher::new(algorithm, AllOnesChallenge);
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let result = launcher.evolve(20, &mut rng)?;
//! assert_eq!(result.best_fitness_history.len(), result.generations);
//! # Ok::<(), gaze::GeneticError>(())
//! ```

pub mod all_ones;
pub mod crossover;
pub mod error;
pub mod evolution;
pub mod individual;
pub mod maze;
pub mod population;
pub mod rng;
#[cfg(feature = "serde")]
pub mod route_log;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result, ResultExt};
