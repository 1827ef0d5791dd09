use tracing::{debug, info};

use super::{algorithm::GeneticAlgorithm, challenge::Challenge, options::LogLevel};
use crate::{
    crossover::CrossoverOperator,
    error::{GeneticError, OptionExt, Result},
    individual::Individual,
    population::Population,
    rng::RandomNumberGenerator,
    selection::SelectionStrategy,
};

/// Represents the result of an evolution run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The fittest individual of the last evaluated generation.
    pub fittest: Individual,
    /// The generation counter when the run stopped. The initial population is generation 1.
    pub generations: usize,
    /// Best fitness of every evaluated generation, in order. Has `generations` entries.
    pub best_fitness_history: Vec<f64>,
}

impl EvolutionResult {
    /// Best fitness seen so far after each generation.
    pub fn running_best(&self) -> Vec<f64> {
        self.best_fitness_history
            .iter()
            .scan(f64::NEG_INFINITY, |best, &fitness| {
                *best = best.max(fitness);
                Some(*best)
            })
            .collect()
    }
}

/// Drives a genetic algorithm against a challenge until its termination rule holds.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<S, X, C>
where
    S: SelectionStrategy,
    X: CrossoverOperator,
    C: Challenge,
{
    algorithm: GeneticAlgorithm<S, X>,
    challenge: C,
}

impl<S, X, C> EvolutionLauncher<S, X, C>
where
    S: SelectionStrategy,
    X: CrossoverOperator,
    C: Challenge,
{
    /// Creates a new `EvolutionLauncher` from the operators and the challenge to solve.
    pub fn new(algorithm: GeneticAlgorithm<S, X>, challenge: C) -> Self {
        Self {
            algorithm,
            challenge,
        }
    }

    pub fn algorithm(&self) -> &GeneticAlgorithm<S, X> {
        &self.algorithm
    }

    pub fn challenge(&self) -> &C {
        &self.challenge
    }

    /// Evolves a random population of `genome_length` genes.
    ///
    /// The loop is evaluate, check termination, crossover, mutate, evaluate, and so on.
    /// The initial population is generation 1.
    ///
    /// # Errors
    ///
    /// Any operator failure aborts the run with a `GeneticError::Evolution` naming the
    /// generation it happened in. A single bad generation is never patched up.
    pub fn evolve(
        &self,
        genome_length: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult> {
        let mut population = self.algorithm.init_population(genome_length, rng);
        self.algorithm
            .eval_population(&mut population, &self.challenge)
            .map_err(|e| abort(1, e))?;

        let mut generation = 1;
        let mut best_fitness_history = Vec::new();

        loop {
            let fittest = population
                .ranked()
                .first()
                .cloned()
                .ok_or_else_genetic(|| abort(generation, GeneticError::EmptyPopulation))?;
            best_fitness_history.push(fittest.fitness());

            if self
                .algorithm
                .is_termination_condition_met(&population, generation)
            {
                debug!(generation, best_fitness = fittest.fitness(), "termination condition met");
                return Ok(EvolutionResult {
                    fittest,
                    generations: generation,
                    best_fitness_history,
                });
            }

            self.report(generation, &fittest);
            population = self
                .step(population, rng)
                .map_err(|e| abort(generation, e))?;
            generation += 1;
        }
    }

    /// Runs crossover, mutation and evaluation once.
    fn step(
        &self,
        mut population: Population,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        let offspring = self.algorithm.crossover_population(&mut population, rng)?;
        let mut next = self.algorithm.mutate_population(offspring, rng)?;
        self.algorithm.eval_population(&mut next, &self.challenge)?;
        Ok(next)
    }

    fn report(&self, generation: usize, fittest: &Individual) {
        match self.algorithm.options().get_log_level() {
            LogLevel::Minimal => info!(generation, best_fitness = fittest.fitness(), "generation"),
            LogLevel::Verbose => info!(
                generation,
                best_fitness = fittest.fitness(),
                genome = %fittest,
                "generation"
            ),
            LogLevel::None => {}
        }
    }
}

fn abort(generation: usize, error: GeneticError) -> GeneticError {
    GeneticError::Evolution(format!("generation {} aborted: {}", generation, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        all_ones::AllOnesChallenge,
        crossover::UniformCrossover,
        evolution::{EvolutionOptions, Termination},
        selection::RouletteWheelSelection,
    };

    type AllOnesLauncher =
        EvolutionLauncher<RouletteWheelSelection, UniformCrossover, AllOnesChallenge>;

    fn launcher(termination: Termination) -> AllOnesLauncher {
        let options = EvolutionOptions::builder()
            .population_size(20)
            .mutation_rate(0.01)
            .crossover_rate(0.95)
            .elitism_count(1)
            .termination(termination)
            .log_level(LogLevel::Verbose)
            .build()
            .unwrap();
        let algorithm =
            GeneticAlgorithm::new(options, RouletteWheelSelection::new(), UniformCrossover::new())
                .unwrap();
        EvolutionLauncher::new(algorithm, AllOnesChallenge)
    }

    #[test]
    fn test_generation_cap() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let result = launcher(Termination::max_generations(15))
            .evolve(20, &mut rng)
            .unwrap();

        assert_eq!(result.generations, 16);
        assert_eq!(result.best_fitness_history.len(), 16);
        assert_eq!(result.fittest.genome_len(), 20);
    }

    #[test]
    fn test_target_reached_in_initial_population() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        // Any individual scores at least 0.0, so the initial population already qualifies.
        let result = launcher(Termination::target_fitness(0.0))
            .evolve(8, &mut rng)
            .unwrap();

        assert_eq!(result.generations, 1);
        assert_eq!(result.best_fitness_history.len(), 1);
    }

    #[test]
    fn test_elitism_keeps_best_from_regressing() {
        let mut rng = RandomNumberGenerator::from_seed(9);
        let result = launcher(Termination::max_generations(50))
            .evolve(30, &mut rng)
            .unwrap();

        for pair in result.best_fitness_history.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(result.running_best(), result.best_fitness_history);
    }

    #[test]
    fn test_failure_aborts_with_generation() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        // Empty genomes cannot be scored by the bit-counting challenge.
        let result = launcher(Termination::max_generations(3)).evolve(0, &mut rng);

        match result {
            Err(GeneticError::Evolution(msg)) => assert!(msg.contains("generation 1")),
            other => panic!("Expected Evolution error, got {:?}", other),
        }
    }

    #[test]
    fn test_running_best() {
        let result = EvolutionResult {
            fittest: Individual::from_genome(vec![1]),
            generations: 4,
            best_fitness_history: vec![0.2, 0.5, 0.4, 0.6],
        };

        assert_eq!(result.running_best(), vec![0.2, 0.5, 0.5, 0.6]);
    }
}
