use tracing::warn;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection) selects
/// an individual with probability proportional to its fitness. The wheel is the
/// population's aggregate fitness as recorded by the last evaluation.
///
/// The wheel position is drawn uniformly in `[0, aggregate)`. Individuals are walked in
/// their current order while accumulating fitness, and the first one whose running sum
/// reaches the position wins. Individuals with zero fitness have no width on the wheel
/// and are never picked while the aggregate is positive. If floating-point drift leaves
/// no winner, the last individual is returned.
///
/// Degenerate wheels:
/// - an aggregate of exactly zero draws position 0, nobody has width, and the
///   last individual is returned;
/// - a negative or non-finite aggregate (e.g. a population that was never evaluated)
///   is a [`GeneticError::DegenerateSelection`] error.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }

    /// Spins the wheel and returns the index of the selected individual.
    fn spin(&self, population: &Population, rng: &mut RandomNumberGenerator) -> Result<usize> {
        let individuals = population.individuals();
        if individuals.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let aggregate = population.aggregate_fitness();
        if !aggregate.is_finite() || aggregate < 0.0 {
            return Err(GeneticError::DegenerateSelection(format!(
                "roulette wheel needs a non-negative aggregate fitness, got {}",
                aggregate
            )));
        }

        if aggregate == 0.0 {
            // No individual has width, so the walk below ends on the last one.
            warn!(
                population_size = individuals.len(),
                "aggregate fitness is zero, selecting the last individual"
            );
        }

        let position = rng.probability() * aggregate;
        let mut spin_wheel = 0.0;
        for (idx, individual) in individuals.iter().enumerate() {
            let fitness = individual.fitness();
            spin_wheel += fitness;
            if fitness > 0.0 && spin_wheel >= position {
                return Ok(idx);
            }
        }

        Ok(individuals.len() - 1)
    }
}

impl SelectionStrategy for RouletteWheelSelection {
    fn select<'a>(
        &self,
        population: &'a mut Population,
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a Individual> {
        let idx = self.spin(population, rng)?;
        population.get(idx)
    }
}
