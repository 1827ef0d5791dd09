//! # Population
//!
//! A `Population` is an ordered collection of [`Individual`]s plus the aggregate
//! fitness recorded by the last evaluation.
//!
//! Order carries no meaning until the population is ranked. [`Population::sort_by_fitness`]
//! is a stable descending sort, so individuals of equal fitness keep their relative order.
//! The population remembers that it is ranked until its contents change, so
//! [`Population::get_fittest`] called in a loop sorts once.

use std::cmp::Ordering;

use crate::error::{GeneticError, Result};
use crate::individual::{Individual, UNEVALUATED};
use crate::rng::RandomNumberGenerator;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
    aggregate_fitness: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    ranked: bool,
}

impl Population {
    /// Creates `size` random individuals of `genome_length` genes each.
    pub fn random(size: usize, genome_length: usize, rng: &mut RandomNumberGenerator) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::random(genome_length, rng))
            .collect();
        Self::from_individuals(individuals)
    }

    /// Wraps already built individuals. The aggregate fitness starts unevaluated.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self {
            individuals,
            aggregate_fitness: UNEVALUATED,
            ranked: false,
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Individuals in their current order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Mutable access to the individuals. Any ranking is forgotten.
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        self.ranked = false;
        &mut self.individuals
    }

    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }

    /// Returns the individual at `index` in the current order.
    pub fn get(&self, index: usize) -> Result<&Individual> {
        self.individuals
            .get(index)
            .ok_or_else(|| self.out_of_bounds(index))
    }

    /// Replaces the individual at `index`.
    pub fn set_individual(&mut self, index: usize, individual: Individual) -> Result<()> {
        let err = self.out_of_bounds(index);
        let slot = self.individuals.get_mut(index).ok_or(err)?;
        *slot = individual;
        self.ranked = false;
        Ok(())
    }

    pub fn aggregate_fitness(&self) -> f64 {
        self.aggregate_fitness
    }

    pub fn set_aggregate_fitness(&mut self, aggregate_fitness: f64) {
        self.aggregate_fitness = aggregate_fitness;
    }

    /// Sorts individuals by descending fitness, keeping equal ones in their relative order.
    /// A non-finite fitness sorts last.
    pub fn sort_by_fitness(&mut self) {
        if self.ranked {
            return;
        }
        self.individuals
            .sort_by(|a, b| descending(a.fitness(), b.fitness()));
        self.ranked = true;
    }

    /// Ranks the population once and returns it, fittest first.
    pub fn ranked(&mut self) -> &[Individual] {
        self.sort_by_fitness();
        &self.individuals
    }

    /// Returns the individual at 0-based `rank`, where rank 0 is the fittest.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` for an empty population and `OutOfBounds`
    /// if `rank` is not smaller than the population size.
    pub fn get_fittest(&mut self, rank: usize) -> Result<&Individual> {
        if self.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        self.sort_by_fitness();
        self.get(rank)
    }

    /// Highest fitness in the population without reordering it.
    pub fn best_fitness(&self) -> Option<f64> {
        self.individuals
            .iter()
            .map(Individual::fitness)
            .max_by(|a, b| descending(*b, *a))
    }

    /// Permutes the individuals uniformly at random, in place.
    pub fn shuffle(&mut self, rng: &mut RandomNumberGenerator) {
        rng.shuffle(&mut self.individuals);
        self.ranked = false;
    }

    fn out_of_bounds(&self, index: usize) -> GeneticError {
        GeneticError::OutOfBounds(format!(
            "individual index {} is outside a population of size {}",
            index,
            self.individuals.len()
        ))
    }
}

/// Orders `a` before `b` when `a` is fitter. NaN counts as the least fit.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or_else(|| {
        if a.is_nan() && b.is_nan() {
            Ordering::Equal
        } else if a.is_nan() {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_fitness(genome: Vec<u8>, fitness: f64) -> Individual {
        let mut individual = Individual::from_genome(genome);
        individual.set_fitness(fitness);
        individual
    }

    #[test]
    fn test_random_population() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let population = Population::random(20, 8, &mut rng);

        assert_eq!(population.len(), 20);
        assert!(population.individuals().iter().all(|i| i.genome_len() == 8));
        assert_eq!(population.aggregate_fitness(), UNEVALUATED);
    }

    #[test]
    fn test_get_fittest_returns_maximum() {
        let mut population = Population::from_individuals(vec![
            with_fitness(vec![0], 0.3),
            with_fitness(vec![1], 0.9),
            with_fitness(vec![2], 0.1),
            with_fitness(vec![3], 0.5),
        ]);

        let fittest = population.get_fittest(0).unwrap().fitness();
        assert_eq!(fittest, 0.9);
        assert!(population.individuals().iter().all(|i| i.fitness() <= fittest));
        assert_eq!(population.get_fittest(3).unwrap().fitness(), 0.1);
    }

    #[test]
    fn test_sort_is_stable_for_equal_fitness() {
        let mut population = Population::from_individuals(vec![
            with_fitness(vec![0], 0.5),
            with_fitness(vec![1], 0.8),
            with_fitness(vec![2], 0.5),
            with_fitness(vec![3], 0.8),
            with_fitness(vec![4], 0.5),
        ]);

        let order: Vec<u8> = population.ranked().iter().map(|i| i.genome()[0]).collect();
        assert_eq!(order, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_nan_fitness_sorts_last() {
        let mut population = Population::from_individuals(vec![
            with_fitness(vec![0], f64::NAN),
            with_fitness(vec![1], 0.2),
        ]);

        assert_eq!(population.get_fittest(0).unwrap().genome(), &[1]);
    }

    #[test]
    fn test_get_fittest_errors() {
        let mut empty = Population::from_individuals(Vec::new());
        assert!(matches!(empty.get_fittest(0), Err(GeneticError::EmptyPopulation)));

        let mut population = Population::from_individuals(vec![with_fitness(vec![0], 0.1)]);
        assert!(matches!(
            population.get_fittest(1),
            Err(GeneticError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_set_individual_is_bounds_checked() {
        let mut population = Population::from_individuals(vec![with_fitness(vec![0], 0.1)]);

        population
            .set_individual(0, with_fitness(vec![1], 0.2))
            .unwrap();
        assert_eq!(population.get(0).unwrap().genome(), &[1]);
        assert!(population.set_individual(1, with_fitness(vec![2], 0.3)).is_err());
        assert_eq!(population.len(), 1);
    }

    #[test]
    fn test_set_individual_forgets_ranking() {
        let mut population = Population::from_individuals(vec![
            with_fitness(vec![0], 0.9),
            with_fitness(vec![1], 0.1),
        ]);
        population.sort_by_fitness();
        population
            .set_individual(1, with_fitness(vec![2], 1.0))
            .unwrap();

        assert_eq!(population.get_fittest(0).unwrap().genome(), &[2]);
    }

    #[test]
    fn test_shuffle_keeps_members() {
        let mut rng = RandomNumberGenerator::from_seed(8);
        let individuals: Vec<Individual> =
            (0..30).map(|i| with_fitness(vec![i], f64::from(i))).collect();
        let mut population = Population::from_individuals(individuals);

        population.shuffle(&mut rng);
        assert_eq!(population.len(), 30);

        let mut genes: Vec<u8> = population.individuals().iter().map(|i| i.genome()[0]).collect();
        genes.sort_unstable();
        assert_eq!(genes, (0..30).collect::<Vec<u8>>());

        assert_eq!(population.get_fittest(0).unwrap().genome(), &[29]);
    }

    #[test]
    fn test_best_fitness_does_not_reorder() {
        let population = Population::from_individuals(vec![
            with_fitness(vec![0], 0.2),
            with_fitness(vec![1], 0.7),
        ]);

        assert_eq!(population.best_fitness(), Some(0.7));
        assert_eq!(population.get(0).unwrap().genome(), &[0]);
        assert_eq!(Population::from_individuals(Vec::new()).best_fitness(), None);
    }
}
