use gaze::{
    all_ones::AllOnesChallenge,
    crossover::UniformCrossover,
    error::GeneticError,
    evolution::{EvolutionLauncher, EvolutionOptions, GeneticAlgorithm, LogLevel, Termination},
    rng::RandomNumberGenerator,
    selection::RouletteWheelSelection,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::INFO)
        .try_init();
}

fn all_ones_launcher(
    termination: Termination,
) -> EvolutionLauncher<RouletteWheelSelection, UniformCrossover, AllOnesChallenge> {
    let options = EvolutionOptions::builder()
        .population_size(100)
        .mutation_rate(0.001)
        .crossover_rate(0.95)
        .elitism_count(2)
        .termination(termination)
        .log_level(LogLevel::Minimal)
        .build()
        .unwrap();
    let algorithm =
        GeneticAlgorithm::new(options, RouletteWheelSelection::new(), UniformCrossover::new())
            .unwrap();
    EvolutionLauncher::new(algorithm, AllOnesChallenge)
}

#[test]
fn test_all_ones_reaches_optimum() {
    init_tracing();
    let launcher = all_ones_launcher(Termination::target_fitness(1.0).or_max_generations(10_000));

    for seed in 0..3 {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let result = launcher.evolve(50, &mut rng).unwrap();

        assert!(
            result.fittest.fitness() >= 1.0 - 1e-9,
            "seed {} stopped at fitness {} after {} generations",
            seed,
            result.fittest.fitness(),
            result.generations
        );
        assert!(result.fittest.genome().iter().all(|&gene| gene == 1));
        assert!(result.generations <= 10_000);
        assert_eq!(result.best_fitness_history.len(), result.generations);
    }
}

#[test]
fn test_all_ones_is_reproducible_with_a_seed() {
    let launcher = all_ones_launcher(Termination::max_generations(30));

    let first = launcher
        .evolve(50, &mut RandomNumberGenerator::from_seed(99))
        .unwrap();
    let second = launcher
        .evolve(50, &mut RandomNumberGenerator::from_seed(99))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_invalid_options_are_rejected() {
    let result = EvolutionOptions::builder()
        .population_size(10)
        .elitism_count(11)
        .build();

    match result {
        Err(GeneticError::Configuration(msg)) => assert!(msg.contains("Elitism count")),
        other => panic!("Expected Configuration error, got {:?}", other),
    }
}
