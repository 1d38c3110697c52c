//! Unit tests for the genetic operators and parent selection.

use ga_cvrp::chromosome::Chromosome;
use ga_cvrp::population::Population;
use ga_cvrp::problem::{Node, Problem};

/// Creates a test problem with a depot and nine customers in a 3x3 grid.
fn create_test_problem() -> Problem {
    let mut nodes = vec![Node::new(0, 0.0, 0.0, 0.0, true)];

    for i in 0..3 {
        for j in 0..3 {
            let id = i * 3 + j + 1;
            let x = (i as f64 + 1.0) * 10.0;
            let y = (j as f64 + 1.0) * 10.0;
            nodes.push(Node::new(id, x, y, 1.0, false));
        }
    }

    Problem::new("TestProblem".to_string(), nodes, 4.0).unwrap()
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

fn route_contents(chromosome: &Chromosome) -> Vec<Vec<usize>> {
    chromosome
        .routes()
        .iter()
        .map(|r| r.customers().to_vec())
        .collect()
}

#[test]
fn test_crossover_closure() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();
    let expected: Vec<usize> = (1..=9).collect();

    for _ in 0..20 {
        let parent1 = Chromosome::from_node_list(&problem, &mut rng);
        let parent2 = Chromosome::from_node_list(&problem, &mut rng);

        let (child1, child2) = parent1.crossover(&parent2, &problem, &mut rng).unwrap();

        for child in [&child1, &child2] {
            assert_eq!(customer_sets(child), expected);
            for route in child.routes() {
                assert!(route.load() <= problem.vehicle_capacity);
                assert!(!route.is_empty());
            }
        }
    }
}

#[test]
fn test_crossover_is_non_destructive() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();

    let parent1 = Chromosome::from_node_list(&problem, &mut rng);
    let parent2 = Chromosome::from_node_list(&problem, &mut rng);

    let before1 = route_contents(&parent1);
    let before2 = route_contents(&parent2);
    let distance1 = parent1.distance();
    let distance2 = parent2.distance();

    let _ = parent1.crossover(&parent2, &problem, &mut rng).unwrap();

    assert_eq!(route_contents(&parent1), before1);
    assert_eq!(route_contents(&parent2), before2);
    assert_eq!(parent1.distance(), distance1);
    assert_eq!(parent2.distance(), distance2);
}

#[test]
fn test_crossover_children_are_evaluated() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();

    let parent1 = Chromosome::from_node_list(&problem, &mut rng);
    let parent2 = Chromosome::from_node_list(&problem, &mut rng);

    let (child, _) = parent1.crossover(&parent2, &problem, &mut rng).unwrap();

    let recomputed: f64 = child.routes().iter().map(|r| r.distance()).sum();
    assert!((child.distance() - recomputed).abs() < 1e-9);
    assert!(child.fitness() > 0.0);
}

#[test]
fn test_mutation_preserves_feasibility_and_coverage() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();
    let expected: Vec<usize> = (1..=9).collect();

    let mut chromosome = Chromosome::from_node_list(&problem, &mut rng);

    for _ in 0..50 {
        chromosome.mutate(1.0, &problem, &mut rng);

        assert_eq!(customer_sets(&chromosome), expected);
        for route in chromosome.routes() {
            assert!(route.load() <= problem.vehicle_capacity);
        }
    }
}

#[test]
fn test_mutation_zero_beta_is_identity() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();

    let mut chromosome = Chromosome::from_node_list(&problem, &mut rng);
    let before = route_contents(&chromosome);

    for _ in 0..20 {
        chromosome.mutate(0.0, &problem, &mut rng);
    }

    assert_eq!(route_contents(&chromosome), before);
}

#[test]
fn test_mutation_keeps_distance_consistent() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();

    let mut chromosome = Chromosome::from_node_list(&problem, &mut rng);

    for _ in 0..50 {
        chromosome.mutate(1.0, &problem, &mut rng);

        let recomputed: f64 = chromosome.routes().iter().map(|r| r.distance()).sum();
        assert!((chromosome.distance() - recomputed).abs() < 1e-9);
    }
}

#[test]
fn test_select_parents_returns_distinct_chromosomes() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();
    let population = Population::initialize(&problem, 10, &mut rng);

    for _ in 0..20 {
        let (parent1, parent2) = population.select_parents(&mut rng).unwrap();
        assert!(!std::ptr::eq(parent1, parent2));
    }
}

#[test]
fn test_select_parents_requires_two_chromosomes() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();
    let population = Population::initialize(&problem, 1, &mut rng);

    let result = population.select_parents(&mut rng);
    assert!(matches!(
        result,
        Err(ga_cvrp::Error::PopulationTooSmall(1))
    ));
}

#[test]
fn test_population_is_sorted_ascending_by_fitness() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();
    let population = Population::initialize(&problem, 12, &mut rng);

    let chromosomes = population.chromosomes();
    for pair in chromosomes.windows(2) {
        assert!(pair[0].fitness() <= pair[1].fitness());
    }

    let best = population.best().unwrap();
    assert_eq!(best.fitness(), chromosomes[chromosomes.len() - 1].fitness());
}

#[test]
fn test_elite_returns_top_chromosomes() {
    let problem = create_test_problem();
    let mut rng = rand::thread_rng();
    let population = Population::initialize(&problem, 8, &mut rng);

    let elite = population.elite(3);
    assert_eq!(elite.len(), 3);

    let chromosomes = population.chromosomes();
    for (i, chromosome) in elite.iter().enumerate() {
        let source = &chromosomes[chromosomes.len() - 3 + i];
        assert_eq!(route_contents(chromosome), route_contents(source));
        assert_eq!(chromosome.distance(), source.distance());
    }

    // Asking for more than the population holds returns everything.
    assert_eq!(population.elite(100).len(), 8);
}
