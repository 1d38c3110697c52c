//! Population management and roulette-wheel parent selection.

use crate::chromosome::Chromosome;
use crate::error::Error;
use crate::problem::Problem;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::cmp::Ordering;

/// An ordered set of chromosomes, kept sorted ascending by fitness so the
/// best solution is always the last element.
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

impl Population {
    /// Build `size` random chromosomes and sort them.
    pub fn initialize<R: Rng>(problem: &Problem, size: usize, rng: &mut R) -> Self {
        let chromosomes = (0..size)
            .map(|_| Chromosome::from_node_list(problem, rng))
            .collect();

        let mut population = Population { chromosomes };
        population.sort();
        population
    }

    /// Sort ascending by fitness (best last).
    pub fn sort(&mut self) {
        self.chromosomes.sort_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Replace the whole population and re-sort.
    pub fn replace(&mut self, chromosomes: Vec<Chromosome>) {
        self.chromosomes = chromosomes;
        self.sort();
    }

    /// The highest-fitness chromosome.
    pub fn best(&self) -> Option<&Chromosome> {
        self.chromosomes.last()
    }

    /// Clones of the top `k` chromosomes by fitness.
    pub fn elite(&self, k: usize) -> Vec<Chromosome> {
        let start = self.chromosomes.len().saturating_sub(k);
        self.chromosomes[start..].to_vec()
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Roulette-wheel selection: draw two distinct chromosomes with
    /// probability proportional to fitness. Zeroing the first winner's
    /// weight before the second draw makes this sampling without
    /// replacement.
    pub fn select_parents<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<(&Chromosome, &Chromosome), Error> {
        if self.chromosomes.len() < 2 {
            return Err(Error::PopulationTooSmall(self.chromosomes.len()));
        }

        let weights: Vec<f64> = self.chromosomes.iter().map(Chromosome::fitness).collect();
        let mut wheel = WeightedIndex::new(&weights).map_err(|_| Error::DegenerateFitness)?;

        let first = wheel.sample(rng);
        wheel
            .update_weights(&[(first, &0.0)])
            .map_err(|_| Error::DegenerateFitness)?;
        let second = wheel.sample(rng);

        Ok((&self.chromosomes[first], &self.chromosomes[second]))
    }
}
