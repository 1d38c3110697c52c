//! # GA-CVRP
//!
//! A genetic-algorithm solver for the Capacitated Vehicle Routing Problem
//! (CVRP): one depot, customers with demands, and a fleet of identical
//! vehicles with a shared capacity. The search partitions customers into
//! capacity-feasible routes that minimize total travel distance.
//!
//! The engine combines greedy capacity-bounded construction, Best-Cost-Route
//! Crossover (BCRC), a capacity-aware swap mutation, roulette-wheel parent
//! selection, and elitism, driven over a fixed number of generations.
//! Child generation can optionally be fanned out over a pool of worker
//! threads, each with its own random stream.

pub mod chromosome;
pub mod config;
pub mod error;
pub mod population;
pub mod problem;
pub mod route;
pub mod utils;

pub use chromosome::{Chromosome, MutationKind, FITNESS_SCALE};
pub use config::GaConfig;
pub use error::Error;
pub use population::Population;
pub use problem::{Node, Problem};
pub use route::Route;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Instant;

/// Run the genetic search and return the best chromosome found after the
/// final generation.
///
/// Each generation carries the top `keep_best` chromosomes over unchanged,
/// fills the rest of the population with children, and re-sorts by fitness.
/// With `n_cores > 1` the children of one generation are produced in
/// contiguous batches by a worker pool reading an immutable snapshot of the
/// current population; a worker failure aborts the generation.
pub fn genetic_algorithm(problem: &Problem, config: &GaConfig) -> Result<Chromosome, Error> {
    validate_config(config)?;

    let start = Instant::now();
    let keep_best = config.keep_best.min(config.n_population);
    let n_child = config.n_population - keep_best;
    let batches = batch_sizes(n_child, config.n_cores);

    let pool = if config.n_cores > 1 {
        Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(config.n_cores)
                .build()?,
        )
    } else {
        None
    };

    let mut rng = ChaCha8Rng::from_entropy();
    let mut population = Population::initialize(problem, config.n_population, &mut rng);

    let report_every = config.n_generations / 12 + 1;

    for generation in 0..config.n_generations {
        let mut next = population.elite(keep_best);

        let children = match &pool {
            Some(pool) => pool.install(|| {
                batches
                    .par_iter()
                    .map(|&batch_size| {
                        // One independent random stream per worker batch.
                        let mut rng = ChaCha8Rng::from_entropy();
                        generate_batch(&population, batch_size, problem, config, &mut rng)
                    })
                    .collect::<Result<Vec<_>, Error>>()
            })?
            .into_iter()
            .flatten()
            .collect(),
            None => generate_batch(&population, n_child, problem, config, &mut rng)?,
        };

        next.extend(children);
        population.replace(next);

        if config.verbose {
            if let Some(best) = population.best() {
                info!(
                    "generation {}: best distance {:.2}",
                    generation + 1,
                    best.distance()
                );
            }
        }
        if generation % report_every == 0 {
            info!(
                "progress: {}%",
                (generation as f64 / config.n_generations as f64 * 100.0).round()
            );
        }
    }

    info!(
        "search finished in {}",
        utils::format_duration(start.elapsed())
    );

    population
        .best()
        .cloned()
        .ok_or(Error::InvalidConfig("population must not be empty"))
}

/// Produce one contiguous batch of children from a read-only population
/// snapshot.
fn generate_batch<R: Rng>(
    population: &Population,
    batch_size: usize,
    problem: &Problem,
    config: &GaConfig,
    rng: &mut R,
) -> Result<Vec<Chromosome>, Error> {
    (0..batch_size)
        .map(|_| generate_child(population, problem, config, rng))
        .collect()
}

/// Select two parents by roulette; with probability `crossover_rate` cross
/// them and keep the fitter child, otherwise clone the first parent; then
/// mutate with probability `mutation_rate`.
fn generate_child<R: Rng>(
    population: &Population,
    problem: &Problem,
    config: &GaConfig,
    rng: &mut R,
) -> Result<Chromosome, Error> {
    let (parent1, parent2) = population.select_parents(rng)?;

    let mut child = if rng.gen::<f64>() < config.crossover_rate {
        let (child1, child2) = parent1.crossover(parent2, problem, rng)?;
        if child2.fitness() > child1.fitness() {
            child2
        } else {
            child1
        }
    } else {
        parent1.clone()
    };

    child.mutate(config.mutation_rate, problem, rng);
    Ok(child)
}

/// Split `n_child` into `n_cores` batch sizes, as evenly as possible with
/// the remainder going to the first batches.
pub fn batch_sizes(n_child: usize, n_cores: usize) -> Vec<usize> {
    let base = n_child / n_cores;
    let remainder = n_child % n_cores;

    (0..n_cores)
        .map(|i| base + usize::from(i < remainder))
        .collect()
}

fn validate_config(config: &GaConfig) -> Result<(), Error> {
    if config.n_generations == 0 {
        return Err(Error::InvalidConfig("n_generations must be positive"));
    }
    if config.n_population == 0 {
        return Err(Error::InvalidConfig("n_population must be positive"));
    }
    if config.n_cores == 0 {
        return Err(Error::InvalidConfig("n_cores must be positive"));
    }
    if !(0.0..=1.0).contains(&config.crossover_rate) {
        return Err(Error::InvalidConfig("crossover_rate must be within [0, 1]"));
    }
    if !(0.0..=1.0).contains(&config.mutation_rate) {
        return Err(Error::InvalidConfig("mutation_rate must be within [0, 1]"));
    }
    Ok(())
}
