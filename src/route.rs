//! A single vehicle route with cached distance and load.

use crate::error::Error;
use crate::problem::Problem;
use itertools::Itertools;
use serde::Serialize;

/// An ordered sequence of customer indices served by one vehicle, implicitly
/// bracketed by the depot at both ends.
///
/// Distance and load are cached and refreshed through [`Route::evaluate`];
/// every mutating method re-evaluates before returning, so the accessors
/// never observe a stale value.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    customers: Vec<usize>,
    distance: f64,
    load: f64,
    modified: bool,
}

impl Route {
    /// Create a route over the given customer sequence and evaluate it.
    pub fn new(customers: Vec<usize>, problem: &Problem) -> Self {
        let mut route = Route {
            customers,
            distance: 0.0,
            load: 0.0,
            modified: true,
        };
        route.evaluate(problem);
        route
    }

    /// Recompute distance and load if the sequence changed since the last
    /// evaluation.
    pub fn evaluate(&mut self, problem: &Problem) {
        if !self.modified {
            return;
        }

        self.distance = Self::sequence_distance(&self.customers, problem);
        self.load = self.customers.iter().map(|&c| problem.demand(c)).sum();
        self.modified = false;
    }

    /// Depot-prefixed, depot-suffixed path length of an arbitrary customer
    /// sequence. Used by the insertion search to price candidate sequences
    /// without mutating any existing route.
    pub fn sequence_distance(customers: &[usize], problem: &Problem) -> f64 {
        let Some((&first, &last)) = customers.first().zip(customers.last()) else {
            return 0.0;
        };

        let depot = problem.depot_index;
        let legs: f64 = customers
            .iter()
            .tuple_windows()
            .map(|(&a, &b)| problem.get_distance(a, b))
            .sum();

        problem.get_distance(depot, first) + legs + problem.get_distance(last, depot)
    }

    /// Total path length including both depot legs.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Sum of the demands of all customers on the route.
    pub fn load(&self) -> f64 {
        self.load
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    pub fn contains(&self, customer: usize) -> bool {
        self.customers.contains(&customer)
    }

    /// Remove a customer from the route. A missing customer is a genetic
    /// operator bug and is reported, never swallowed.
    pub fn remove(&mut self, customer: usize, problem: &Problem) -> Result<(), Error> {
        let position = self
            .customers
            .iter()
            .position(|&c| c == customer)
            .ok_or(Error::CustomerNotInRoute(customer))?;

        self.customers.remove(position);
        self.modified = true;
        self.evaluate(problem);
        Ok(())
    }

    /// Overwrite the customer at `index`. Used by the swap mutation after
    /// both capacity checks have passed.
    pub fn replace(&mut self, index: usize, customer: usize, problem: &Problem) {
        self.customers[index] = customer;
        self.modified = true;
        self.evaluate(problem);
    }
}
