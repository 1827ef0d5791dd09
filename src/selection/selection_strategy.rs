use std::fmt::Debug;

use crate::error::Result;
use crate::individual::Individual;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection strategies.
///
/// A selection strategy picks the second parent for crossover from an evaluated
/// population. One strategy is chosen per run; strategies are not mixed.
///
/// Selection takes the population mutably because some strategies reorder it:
/// [`TournamentSelection`](crate::selection::TournamentSelection) shuffles the
/// population in place, destroying any fitness ranking. Callers that need the
/// ranking afterwards must snapshot it first.
///
/// # Examples
///
/// ```
/// use gaze::individual::Individual;
/// use gaze::population::Population;
/// use gaze::rng::RandomNumberGenerator;
/// use gaze::selection::{SelectionStrategy, TournamentSelection};
///
/// let mut population = Population::from_individuals(
///     (0..5u8)
///         .map(|i| {
///             let mut individual = Individual::from_genome(vec![i]);
///             individual.set_fitness(f64::from(i));
///             individual
///         })
///         .collect(),
/// );
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let selection = TournamentSelection::new(5).unwrap();
/// let winner = selection.select(&mut population, &mut rng).unwrap();
///
/// assert_eq!(winner.fitness(), 4.0);
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects one individual from the population.
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty or the strategy cannot be
    /// applied to it (for example a tournament larger than the population).
    fn select<'a>(
        &self,
        population: &'a mut Population,
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a Individual>;
}
