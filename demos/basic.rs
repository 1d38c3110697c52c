//! Basic example of using the GA-CVRP library without an instance file.

use ga_cvrp::utils::{format_duration, print_route_grid};
use ga_cvrp::{genetic_algorithm, GaConfig, Node, Problem};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A small instance: depot in the middle of a ring of customers.
    let mut nodes = vec![Node::new(0, 50.0, 50.0, 0.0, true)];
    for i in 1..=12 {
        let angle = i as f64 / 12.0 * std::f64::consts::TAU;
        let x = 50.0 + 40.0 * angle.cos();
        let y = 50.0 + 40.0 * angle.sin();
        nodes.push(Node::new(i, x, y, 10.0, false));
    }

    let problem = Problem::new("ring-12".to_string(), nodes, 40.0)?;
    problem.validate()?;
    println!(
        "Instance {} with {} customers, capacity {}",
        problem.name,
        problem.customer_count(),
        problem.vehicle_capacity
    );

    let config = GaConfig::new()
        .with_n_generations(200)
        .with_n_population(30)
        .with_keep_best(3)
        .with_crossover_rate(0.5)
        .with_mutation_rate(0.15)
        .with_n_cores(2);

    let start = Instant::now();
    let best = genetic_algorithm(&problem, &config)?;
    println!("Search completed in {}", format_duration(start.elapsed()));
    println!("{}", best.summary(&problem));

    print_route_grid(&best, &problem);

    Ok(())
}
