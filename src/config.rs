//! Configuration parameters for the genetic search.

use serde::{Deserialize, Serialize};

/// Settings for one run of [`genetic_algorithm`](crate::genetic_algorithm).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of generations to run. The loop always runs the full count;
    /// there is no early-stop criterion.
    pub n_generations: usize,
    /// Fixed population size.
    pub n_population: usize,
    /// Number of elite chromosomes carried unchanged into the next
    /// generation. Clamped to `n_population` by the driver.
    pub keep_best: usize,
    /// Probability that a child is produced by crossover rather than cloned
    /// from a parent.
    pub crossover_rate: f64,
    /// Probability that a child is mutated.
    pub mutation_rate: f64,
    /// Number of worker threads for child generation; 1 runs sequentially.
    pub n_cores: usize,
    /// Log the best distance after every generation.
    pub verbose: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        GaConfig {
            n_generations: 500,
            n_population: 20,
            keep_best: 2,
            crossover_rate: 0.25,
            mutation_rate: 0.1,
            n_cores: 4,
            verbose: false,
        }
    }
}

impl GaConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        GaConfig::default()
    }

    /// Set the generation count.
    pub fn with_n_generations(mut self, n: usize) -> Self {
        self.n_generations = n;
        self
    }

    /// Set the population size.
    pub fn with_n_population(mut self, n: usize) -> Self {
        self.n_population = n;
        self
    }

    /// Set the number of elite chromosomes.
    pub fn with_keep_best(mut self, n: usize) -> Self {
        self.keep_best = n;
        self
    }

    /// Set the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Set the mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the worker thread count.
    pub fn with_n_cores(mut self, n: usize) -> Self {
        self.n_cores = n;
        self
    }

    /// Enable per-generation best-distance logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
