//! Candidate solution representation and the genetic operators.

use crate::error::Error;
use crate::problem::Problem;
use crate::route::Route;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Normalization constant for the fitness score. Keeps fitness in (0, 1]
/// for realistic instance sizes.
pub const FITNESS_SCALE: f64 = 1073.0;

/// The kinds of mutation the search knows about. Only [`MutationKind::Swap`]
/// is active; the segment variants are kept as named stubs with a selection
/// probability of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Swap,
    SegmentShift,
    SegmentInversion,
}

/// One full candidate solution: a set of routes that together serve every
/// customer exactly once.
///
/// Total distance and fitness are cached; every operation that changes route
/// contents re-evaluates before it returns.
#[derive(Debug, Clone, Serialize)]
pub struct Chromosome {
    routes: Vec<Route>,
    distance: f64,
    fitness: f64,
}

impl Chromosome {
    /// Wrap an already-built route list and evaluate it. Degenerate empty
    /// routes are pruned.
    pub fn new(mut routes: Vec<Route>, problem: &Problem) -> Self {
        routes.retain(|r| !r.is_empty());

        let mut chromosome = Chromosome {
            routes,
            distance: 0.0,
            fitness: 0.0,
        };
        chromosome.evaluate(problem);
        chromosome
    }

    /// Build a random feasible chromosome: walk a uniformly random
    /// permutation of all customers once, greedily appending to the current
    /// route while capacity allows and opening a new route when it would
    /// overflow. The randomness of the order is what gives the population
    /// its diversity; the packing rule itself is deterministic.
    pub fn from_node_list<R: Rng>(problem: &Problem, rng: &mut R) -> Self {
        let mut order = problem.customer_indices();
        order.shuffle(rng);

        let mut routes = Vec::new();
        let mut current: Vec<usize> = Vec::new();
        let mut used = 0.0;

        for customer in order {
            let demand = problem.demand(customer);
            if used + demand <= problem.vehicle_capacity {
                current.push(customer);
                used += demand;
            } else {
                routes.push(Route::new(std::mem::take(&mut current), problem));
                current.push(customer);
                used = demand;
            }
        }
        routes.push(Route::new(current, problem));

        Chromosome::new(routes, problem)
    }

    /// Refresh every route's caches and the chromosome's totals.
    pub fn evaluate(&mut self, problem: &Problem) {
        for route in &mut self.routes {
            route.evaluate(problem);
        }

        self.distance = self.routes.iter().map(Route::distance).sum();
        self.fitness = FITNESS_SCALE / self.distance;
    }

    /// Sum of all route distances.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Inverse-distance score, higher is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Total number of customers across all routes.
    pub fn customer_count(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Best-Cost-Route Crossover. Picks one donor route from each parent and
    /// builds each child by re-inserting the other parent's donor customers
    /// into a copy of its own route structure. Non-destructive: both parents
    /// are left untouched.
    pub fn crossover<R: Rng>(
        &self,
        other: &Chromosome,
        problem: &Problem,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome), Error> {
        let path1 = self.routes.clone();
        let path2 = other.routes.clone();

        let donor1 = path1[rng.gen_range(0..path1.len())].customers().to_vec();
        let donor2 = path2[rng.gen_range(0..path2.len())].customers().to_vec();

        let child1 = Chromosome::new(Self::bcrc(path1, &donor2, problem, rng)?, problem);
        let child2 = Chromosome::new(Self::bcrc(path2, &donor1, problem, rng)?, problem);

        Ok((child1, child2))
    }

    /// Delete every donor customer from the path, drop emptied routes, then
    /// re-insert the donors one by one in random order, each at the globally
    /// cheapest feasible position found by a full scan. Later insertions see
    /// the state left by earlier ones. A customer no route can accept opens
    /// a new singleton route.
    fn bcrc<R: Rng>(
        mut path: Vec<Route>,
        donors: &[usize],
        problem: &Problem,
        rng: &mut R,
    ) -> Result<Vec<Route>, Error> {
        for &customer in donors {
            if let Some(index) = path.iter().position(|r| r.contains(customer)) {
                path[index].remove(customer, problem)?;
            }
        }
        path.retain(|r| !r.is_empty());

        let mut order = donors.to_vec();
        order.shuffle(rng);

        for customer in order {
            let demand = problem.demand(customer);
            let mut best: Option<(usize, Vec<usize>, f64)> = None;

            for (route_index, route) in path.iter().enumerate() {
                if route.load() + demand > problem.vehicle_capacity {
                    continue;
                }

                for position in 0..=route.len() {
                    let mut candidate = route.customers().to_vec();
                    candidate.insert(position, customer);

                    let gain = Route::sequence_distance(&candidate, problem) - route.distance();
                    // Strict comparison keeps the first-found candidate on ties.
                    if best.as_ref().map_or(true, |(_, _, g)| gain < *g) {
                        best = Some((route_index, candidate, gain));
                    }
                }
            }

            match best {
                Some((route_index, candidate, _)) => {
                    path[route_index] = Route::new(candidate, problem);
                }
                None => path.push(Route::new(vec![customer], problem)),
            }
        }

        Ok(path)
    }

    /// With probability `beta`, apply the active mutation kind.
    pub fn mutate<R: Rng>(&mut self, beta: f64, problem: &Problem, rng: &mut R) {
        if rng.gen::<f64>() < beta {
            self.apply_mutation(MutationKind::Swap, problem, rng);
        }
    }

    pub fn apply_mutation<R: Rng>(&mut self, kind: MutationKind, problem: &Problem, rng: &mut R) {
        match kind {
            MutationKind::Swap => self.swap_mutation(problem, rng),
            MutationKind::SegmentShift => unimplemented!("segment shift mutation is not wired in"),
            MutationKind::SegmentInversion => {
                unimplemented!("segment inversion mutation is not wired in")
            }
        }
    }

    /// Draw two (route, position) slots uniformly and exchange the customers
    /// if both routes stay within capacity after the swap; otherwise discard
    /// the draw. Drawing the same slot twice is a no-op.
    fn swap_mutation<R: Rng>(&mut self, problem: &Problem, rng: &mut R) {
        if self.routes.is_empty() {
            return;
        }

        let x_route = rng.gen_range(0..self.routes.len());
        let x_index = rng.gen_range(0..self.routes[x_route].len());
        let y_route = rng.gen_range(0..self.routes.len());
        let y_index = rng.gen_range(0..self.routes[y_route].len());

        let x = self.routes[x_route].customers()[x_index];
        let y = self.routes[y_route].customers()[y_index];

        let x_space_left =
            problem.vehicle_capacity - (self.routes[x_route].load() - problem.demand(x));
        let y_space_left =
            problem.vehicle_capacity - (self.routes[y_route].load() - problem.demand(y));

        if x_space_left >= problem.demand(y) && y_space_left >= problem.demand(x) {
            self.routes[x_route].replace(x_index, y, problem);
            self.routes[y_route].replace(y_index, x, problem);
            self.evaluate(problem);
        }
    }

    /// Multi-line report: route count, total distance, and each route's
    /// node-id sequence with its distance.
    pub fn summary(&self, problem: &Problem) -> String {
        let mut lines = vec![
            format!("Number of routes: {}", self.routes.len()),
            format!("Distance: {:.2}", self.distance),
        ];

        for (i, route) in self.routes.iter().enumerate() {
            let ids: Vec<String> = route
                .customers()
                .iter()
                .map(|&c| problem.nodes[c].id.to_string())
                .collect();
            lines.push(format!(
                "Route {} -> [{}] (Distance: {:.2})",
                i + 1,
                ids.join(", "),
                route.distance()
            ));
        }

        lines.join("\n")
    }
}

impl PartialEq for Chromosome {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}

impl PartialOrd for Chromosome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.fitness.partial_cmp(&other.fitness)
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of routes: {}", self.routes.len())?;
        write!(f, "Distance: {:.2}", self.distance)?;

        for (i, route) in self.routes.iter().enumerate() {
            write!(
                f,
                "\nRoute {} -> {:?} (Distance: {:.2})",
                i + 1,
                route.customers(),
                route.distance()
            )?;
        }

        Ok(())
    }
}
