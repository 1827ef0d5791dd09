pub mod algorithm;
pub mod challenge;
pub mod launcher;
pub mod options;
pub mod termination;

pub use algorithm::GeneticAlgorithm;
pub use challenge::Challenge;
pub use launcher::{EvolutionLauncher, EvolutionResult};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
pub use termination::Termination;
