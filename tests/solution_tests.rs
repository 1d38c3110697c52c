//! Unit tests for routes and chromosomes.

use ga_cvrp::chromosome::{Chromosome, FITNESS_SCALE};
use ga_cvrp::problem::{Node, Problem};
use ga_cvrp::route::Route;

/// Creates a simple test problem with a depot and five customers.
fn create_test_problem() -> Problem {
    let nodes = vec![
        Node::new(0, 0.0, 0.0, 0.0, true),
        Node::new(1, 3.0, 4.0, 2.0, false),
        Node::new(2, 0.0, 10.0, 2.0, false),
        Node::new(3, 10.0, 10.0, 3.0, false),
        Node::new(4, 20.0, 0.0, 4.0, false),
        Node::new(5, 20.0, 10.0, 5.0, false),
    ];

    Problem::new("TestProblem".to_string(), nodes, 8.0).unwrap()
}

/// Four customers with demand 10 each and capacity 20: greedy packing must
/// always produce exactly two full routes.
fn create_pairing_problem() -> Problem {
    let nodes = vec![
        Node::new(0, 0.0, 0.0, 0.0, true),
        Node::new(1, 10.0, 0.0, 10.0, false),
        Node::new(2, 0.0, 10.0, 10.0, false),
        Node::new(3, -10.0, 0.0, 10.0, false),
        Node::new(4, 0.0, -10.0, 10.0, false),
    ];

    Problem::new("Pairing".to_string(), nodes, 20.0).unwrap()
}

fn customer_sets(chromosome: &Chromosome) -> Vec<usize> {
    let mut all: Vec<usize> = chromosome
        .routes()
        .iter()
        .flat_map(|r| r.customers().iter().copied())
        .collect();
    all.sort_unstable();
    all
}

#[test]
fn test_distance_symmetry() {
    let problem = create_test_problem();

    for i in 0..problem.nodes.len() {
        for j in 0..problem.nodes.len() {
            assert_eq!(problem.get_distance(i, j), problem.get_distance(j, i));
        }
    }
}

#[test]
fn test_route_round_trip_distance() {
    let problem = create_test_problem();

    // Customer 1 sits at (3, 4), so the round trip from the depot is 10.
    let route = Route::new(vec![1], &problem);
    assert!((route.distance() - 10.0).abs() < 1e-9);
    assert_eq!(route.load(), 2.0);
    assert_eq!(route.len(), 1);
}

#[test]
fn test_sequence_distance_empty() {
    let problem = create_test_problem();
    assert_eq!(Route::sequence_distance(&[], &problem), 0.0);
}

#[test]
fn test_route_remove_updates_caches() {
    let problem = create_test_problem();
    let mut route = Route::new(vec![1, 2], &problem);
    let initial_distance = route.distance();

    route.remove(2, &problem).unwrap();

    assert_eq!(route.customers(), &[1]);
    assert_eq!(route.load(), 2.0);
    assert!((route.distance() - 10.0).abs() < 1e-9);
    assert!(route.distance() < initial_distance);
}

#[test]
fn test_route_remove_missing_customer_fails() {
    let problem = create_test_problem();
    let mut route = Route::new(vec![1], &problem);

    let result = route.remove(5, &problem);
    assert!(matches!(
        result,
        Err(ga_cvrp::Error::CustomerNotInRoute(5))
    ));

    // The route is untouched after the failed removal.
    assert_eq!(route.customers(), &[1]);
}

#[test]
fn test_route_replace_updates_caches() {
    let problem = create_test_problem();
    let mut route = Route::new(vec![1], &problem);

    route.replace(0, 3, &problem);

    assert_eq!(route.customers(), &[3]);
    assert_eq!(route.load(), 3.0);
    let expected = 2.0 * problem.get_distance(problem.depot_index, 3);
    assert!((route.distance() - expected).abs() < 1e-9);
}

#[test]
fn test_fitness_is_inverse_distance() {
    let problem = create_test_problem();
    let chromosome = Chromosome::new(vec![Route::new(vec![1], &problem)], &problem);

    assert!((chromosome.distance() - 10.0).abs() < 1e-9);
    assert!((chromosome.fitness() - FITNESS_SCALE / 10.0).abs() < 1e-9);
}

#[test]
fn test_fitness_monotonicity() {
    let problem = create_test_problem();

    let near = Chromosome::new(vec![Route::new(vec![1], &problem)], &problem);
    let far = Chromosome::new(vec![Route::new(vec![5], &problem)], &problem);

    assert!(near.distance() < far.distance());
    assert!(near.fitness() > far.fitness());
    assert!(near > far);
}

#[test]
fn test_empty_routes_are_pruned() {
    let problem = create_test_problem();
    let chromosome = Chromosome::new(
        vec![Route::new(vec![], &problem), Route::new(vec![1], &problem)],
        &problem,
    );

    assert_eq!(chromosome.route_count(), 1);
    assert_eq!(chromosome.customer_count(), 1);
}

#[test]
fn test_from_node_list_coverage_and_capacity() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();

    for _ in 0..25 {
        let chromosome = Chromosome::from_node_list(&problem, &mut rng);

        assert_eq!(customer_sets(&chromosome), vec![1, 2, 3, 4, 5]);
        for route in chromosome.routes() {
            assert!(route.load() <= problem.vehicle_capacity);
            assert!(!route.is_empty());
        }
    }
}

#[test]
fn test_from_node_list_always_two_full_routes() {
    let problem = create_pairing_problem();
    let mut rng = rand::thread_rng();

    for _ in 0..25 {
        let chromosome = Chromosome::from_node_list(&problem, &mut rng);

        assert_eq!(chromosome.route_count(), 2);
        for route in chromosome.routes() {
            assert_eq!(route.load(), 20.0);
        }
    }
}

#[test]
fn test_summary_lists_every_route() {
    let problem = create_test_problem();
    let chromosome = Chromosome::new(
        vec![
            Route::new(vec![1, 2], &problem),
            Route::new(vec![3], &problem),
        ],
        &problem,
    );

    let summary = chromosome.summary(&problem);
    assert!(summary.contains("Number of routes: 2"));
    assert!(summary.contains("Distance:"));
    assert!(summary.contains("Route 1 ->"));
    assert!(summary.contains("Route 2 ->"));
}
