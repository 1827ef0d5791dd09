//! # GeneticAlgorithm
//!
//! The operators of one generational step: initialisation, evaluation, termination,
//! crossover and mutation. A driver (see [`EvolutionLauncher`](super::EvolutionLauncher))
//! chains them as
//!
//! ```text
//! init -> eval -> loop { termination? -> crossover -> mutate -> eval }
//! ```
//!
//! Every operator returns a new population or rewrites only fitness fields, so an
//! individual placed into a generation is never aliased by the next one.

use rayon::prelude::*;
use tracing::{debug, trace};

use super::{challenge::Challenge, options::EvolutionOptions};
use crate::{
    crossover::CrossoverOperator,
    error::{GeneticError, Result},
    individual::Individual,
    population::Population,
    rng::RandomNumberGenerator,
    selection::SelectionStrategy,
};

/// Genetic operators parameterised by hyperparameters, a parent selection strategy
/// and a crossover operator.
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm<S, X>
where
    S: SelectionStrategy,
    X: CrossoverOperator,
{
    options: EvolutionOptions,
    selection: S,
    crossover: X,
}

impl<S, X> GeneticAlgorithm<S, X>
where
    S: SelectionStrategy,
    X: CrossoverOperator,
{
    /// Creates the operators after validating `options`.
    pub fn new(options: EvolutionOptions, selection: S, crossover: X) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            selection,
            crossover,
        })
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    pub fn crossover(&self) -> &X {
        &self.crossover
    }

    /// Creates a fresh random population of the configured size.
    pub fn init_population(
        &self,
        genome_length: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Population {
        Population::random(self.options.get_population_size(), genome_length, rng)
    }

    /// Scores every individual exactly once, stores each score on its individual and
    /// records the sum as the population's aggregate fitness.
    ///
    /// Populations of at least `parallel_threshold` individuals are scored in parallel.
    /// The aggregate is summed in population order after all scores are in, so it does
    /// not depend on the thread schedule.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` for an empty population, any error of the challenge,
    /// and `FitnessCalculation` for a non-finite score.
    pub fn eval_population<C>(&self, population: &mut Population, challenge: &C) -> Result<f64>
    where
        C: Challenge + ?Sized,
    {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let parallel = population.len() >= self.options.get_parallel_threshold();
        let scores: Vec<f64> = if parallel {
            population
                .individuals_mut()
                .par_iter_mut()
                .map(|individual| score_individual(challenge, individual))
                .collect::<Result<Vec<f64>>>()?
        } else {
            population
                .individuals_mut()
                .iter_mut()
                .map(|individual| score_individual(challenge, individual))
                .collect::<Result<Vec<f64>>>()?
        };

        let aggregate: f64 = scores.iter().sum();
        population.set_aggregate_fitness(aggregate);

        debug!(
            aggregate_fitness = aggregate,
            population_size = scores.len(),
            parallel,
            "population evaluated"
        );
        Ok(aggregate)
    }

    /// True if the configured termination rule holds for this evaluated population
    /// at `generation`.
    pub fn is_termination_condition_met(&self, population: &Population, generation: usize) -> bool {
        self.options.get_termination().is_met(population, generation)
    }

    /// Builds the next generation, rank by rank.
    ///
    /// The population is ranked once and the ranking is snapshotted, so the parent at
    /// rank `i` is fixed even though tournament selection reshuffles `population`.
    /// Elite ranks, and non-elite ranks whose crossover draw fails, are copied over
    /// unchanged with their fitness. Every other rank receives an unevaluated offspring
    /// of its ranked parent and a parent picked by the selection strategy.
    pub fn crossover_population(
        &self,
        population: &mut Population,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let parents: Vec<Individual> = population.ranked().to_vec();
        let crossover_rate = self.options.get_crossover_rate();
        let mut offspring = Vec::with_capacity(parents.len());
        let mut recombined = 0usize;

        for (rank, parent1) in parents.iter().enumerate() {
            if self.options.is_elite(rank) || rng.probability() >= crossover_rate {
                offspring.push(parent1.clone());
                continue;
            }

            let parent2 = self.selection.select(population, rng)?;
            offspring.push(self.crossover.recombine(parent1, parent2, rng)?);
            recombined += 1;
        }

        trace!(recombined, population_size = offspring.len(), "crossover complete");
        Ok(Population::from_individuals(offspring))
    }

    /// Flips each gene of every non-elite individual with probability `mutation_rate`.
    ///
    /// The population is ranked with the stable fitness sort first, so the elites carried
    /// over by crossover occupy the elite ranks and pass through untouched. Individuals
    /// that had at least one gene flipped lose their stale fitness.
    pub fn mutate_population(
        &self,
        mut population: Population,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        population.sort_by_fitness();
        let mutation_rate = self.options.get_mutation_rate();

        let individuals = population
            .into_individuals()
            .into_iter()
            .enumerate()
            .map(|(rank, mut individual)| -> Result<Individual> {
                if self.options.is_elite(rank) {
                    return Ok(individual);
                }

                let mut mutated = false;
                for index in 0..individual.genome_len() {
                    if mutation_rate > rng.probability() {
                        individual.flip_gene(index)?;
                        mutated = true;
                    }
                }
                if mutated {
                    individual.invalidate_fitness();
                }
                Ok(individual)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Population::from_individuals(individuals))
    }
}

fn score_individual<C>(challenge: &C, individual: &mut Individual) -> Result<f64>
where
    C: Challenge + ?Sized,
{
    let score = challenge.score(individual)?;
    if !score.is_finite() {
        return Err(GeneticError::FitnessCalculation(format!(
            "Non-finite fitness score encountered: {}",
            score
        )));
    }
    individual.set_fitness(score);
    Ok(score)
}
