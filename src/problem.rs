//! Problem definition and instance loading for the CVRP.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// A node (customer or depot) in the CVRP.
///
/// Nodes are immutable after construction and are referenced everywhere else
/// by their index into [`Problem::nodes`]; equality is by id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub demand: f64,
    pub is_depot: bool,
}

impl Node {
    pub fn new(id: usize, x: f64, y: f64, demand: f64, is_depot: bool) -> Self {
        Node {
            id,
            x,
            y,
            demand,
            is_depot,
        }
    }

    /// Euclidean distance to another node.
    pub fn distance(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

/// A CVRP instance: one depot, a set of customers with demands, one shared
/// vehicle capacity, and a distance table built once at construction.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    pub name: String,
    pub nodes: Vec<Node>,
    pub depot_index: usize,
    pub vehicle_capacity: f64,
    distance_matrix: Vec<Vec<f64>>,
}

impl Problem {
    /// Build a problem from a node list. The depot is the unique node with
    /// zero demand; its absence is a fatal configuration error.
    pub fn new(name: String, nodes: Vec<Node>, vehicle_capacity: f64) -> Result<Self, Error> {
        let depots: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.demand == 0.0)
            .map(|(i, _)| i)
            .collect();

        let depot_index = match depots.as_slice() {
            [] => return Err(Error::DepotNotFound),
            [single] => *single,
            many => return Err(Error::MultipleDepots(many.len())),
        };

        let distance_matrix = Self::compute_distance_matrix(&nodes);

        Ok(Problem {
            name,
            nodes,
            depot_index,
            vehicle_capacity,
            distance_matrix,
        })
    }

    /// Reject instances the search cannot work with: no customers at all, or
    /// a single customer that can never fit in a vehicle.
    pub fn validate(&self) -> Result<(), Error> {
        if self.customer_count() == 0 {
            return Err(Error::InvalidConfig("instance has no customers"));
        }

        for node in &self.nodes {
            if !node.is_depot && node.demand > self.vehicle_capacity {
                return Err(Error::DemandExceedsCapacity {
                    id: node.id,
                    demand: node.demand,
                    capacity: self.vehicle_capacity,
                });
            }
        }
        Ok(())
    }

    /// Distance between two node indices.
    pub fn get_distance(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from][to]
    }

    /// Demand of the node at the given index.
    pub fn demand(&self, index: usize) -> f64 {
        self.nodes[index].demand
    }

    /// Number of customers (excluding the depot).
    pub fn customer_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Indices of all non-depot nodes.
    pub fn customer_indices(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| i != self.depot_index)
            .collect()
    }

    /// The depot node.
    pub fn depot(&self) -> &Node {
        &self.nodes[self.depot_index]
    }

    fn compute_distance_matrix(nodes: &[Node]) -> Vec<Vec<f64>> {
        let n = nodes.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    matrix[i][j] = nodes[i].distance(&nodes[j]);
                }
            }
        }

        matrix
    }

    /// Load an instance from a semicolon-separated file with a header line
    /// and one `node_id;demand;x;y` row per node.
    pub fn from_csv<P: AsRef<Path>>(path: P, vehicle_capacity: f64) -> Result<Self, Error> {
        let name = path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "instance".to_string());

        let file = File::open(path)?;
        let reader = io::BufReader::new(file);

        let mut nodes = Vec::new();

        for (line_no, line_result) in reader.lines().enumerate().skip(1) {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(';').map(str::trim).collect();
            if fields.len() != 4 {
                return Err(Error::Parse {
                    line: line_no + 1,
                    reason: format!("expected 4 fields, got {}", fields.len()),
                });
            }

            let parse_field = |field: &str, what: &str| -> Result<f64, Error> {
                field.parse::<f64>().map_err(|_| Error::Parse {
                    line: line_no + 1,
                    reason: format!("{} is not a number: {:?}", what, field),
                })
            };

            let id = fields[0].parse::<usize>().map_err(|_| Error::Parse {
                line: line_no + 1,
                reason: format!("node id is not an integer: {:?}", fields[0]),
            })?;
            let demand = parse_field(fields[1], "demand")?;
            let x = parse_field(fields[2], "x")?;
            let y = parse_field(fields[3], "y")?;

            if demand < 0.0 {
                return Err(Error::Parse {
                    line: line_no + 1,
                    reason: format!("demand must be non-negative, got {}", demand),
                });
            }

            nodes.push(Node::new(id, x, y, demand, demand == 0.0));
        }

        let problem = Problem::new(name, nodes, vehicle_capacity)?;
        problem.validate()?;
        Ok(problem)
    }
}
