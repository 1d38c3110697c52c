//! Error types for instance loading and the genetic search.

use thiserror::Error;

/// Errors surfaced by the solver.
#[derive(Debug, Error)]
pub enum Error {
    /// The instance has no node with zero demand.
    #[error("no depot found: the instance needs exactly one node with zero demand")]
    DepotNotFound,

    /// The instance has more than one node with zero demand.
    #[error("found {0} depot candidates with zero demand, expected exactly one")]
    MultipleDepots(usize),

    /// A single customer can never be served by one vehicle.
    #[error("customer {id} has demand {demand} which exceeds the vehicle capacity {capacity}")]
    DemandExceedsCapacity {
        id: usize,
        demand: f64,
        capacity: f64,
    },

    /// Removal of a customer that is not part of the route. Indicates a bug
    /// in a genetic operator, never a recoverable condition.
    #[error("customer {0} is not part of this route")]
    CustomerNotInRoute(usize),

    /// Parent selection needs at least two chromosomes.
    #[error("population of size {0} is too small for parent selection")]
    PopulationTooSmall(usize),

    /// Roulette weights could not be built (all fitness values non-positive).
    #[error("fitness weights are unusable for roulette selection")]
    DegenerateFitness,

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A malformed row in an instance file.
    #[error("malformed instance data at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
