use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through tournament selection.
///
/// Tournament selection shuffles the whole population in place, takes the first
/// `tournament_size` individuals as the tournament (a uniform draw without replacement)
/// and returns the fittest of them. Ties go to the earlier participant.
///
/// Tournament selection provides a balance between exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
///
/// With `tournament_size == population.len()` the global fittest always wins.
///
/// Selection is not side-effect free: the shuffle destroys any fitness ranking of the
/// population it draws from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Returns the index of the tournament winner among the first `tournament_size`
    /// individuals of `individuals`.
    fn run_tournament(&self, individuals: &[Individual]) -> usize {
        let mut best_idx = 0;
        let mut best_fitness = individuals[0].fitness();

        for (idx, individual) in individuals
            .iter()
            .enumerate()
            .take(self.tournament_size)
            .skip(1)
        {
            if individual.fitness() > best_fitness {
                best_idx = idx;
                best_fitness = individual.fitness();
            }
        }

        best_idx
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 2 }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select<'a>(
        &self,
        population: &'a mut Population,
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a Individual> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        if self.tournament_size > population.len() {
            return Err(GeneticError::Configuration(format!(
                "Tournament size ({}) exceeds population size ({})",
                self.tournament_size,
                population.len()
            )));
        }

        population.shuffle(rng);
        let winner_idx = self.run_tournament(population.individuals());
        population.get(winner_idx)
    }
}
