//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for every
//! genetic operator. It wraps the `rand` crate's `StdRng` and is passed explicitly,
//! so a run seeded with [`RandomNumberGenerator::from_seed`] is reproducible.
//!
//! ## Example
//!
//! ```rust
//! use gaze::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let draws: Vec<f64> = (0..5).map(|_| rng.probability()).collect();
//!
//! for draw in draws {
//!     assert!((0.0..1.0).contains(&draw));
//! }
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` with the draws the genetic operators need.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a uniform value in `[0, 1)`.
    pub fn probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draws a uniform index in `[0, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is zero.
    pub fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Returns `true` with probability 0.5.
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Shuffles `items` in place with a uniform Fisher-Yates permutation.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
