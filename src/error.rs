//! # Error Types
//!
//! This module defines the error type shared by every operator in the crate.
//! A single bad generation is fatal to a run: operators return these errors
//! and the launcher aborts instead of trying to repair the population.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use gaze::error::{GeneticError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(GeneticError::Configuration(format!("rate {} is not a probability", rate)));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(check_rate(0.5).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use gaze::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[u32]) -> gaze::error::Result<u32> {
//!     scores.iter().max().cloned().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_score(&[1, 4, 2]).unwrap(), 4);
//! assert!(best_score(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while running a genetic algorithm.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration or argument shape is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when a gene or individual index is outside its container.
    #[error("Bounds error: {0}")]
    OutOfBounds(String),

    /// Error that occurs when roulette-wheel selection has no usable wheel.
    #[error("Degenerate selection: {0}")]
    DegenerateSelection(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation fails.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when an evolution run has to be aborted.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use gaze::error::ResultExt;
/// use std::fs::File;
///
/// fn open_log(path: &str) -> gaze::error::Result<()> {
///     File::open(path).context("Failed to open route log")?;
///     Ok(())
/// }
///
/// assert!(open_log("/definitely/not/here.jsonl").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `GeneticError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
