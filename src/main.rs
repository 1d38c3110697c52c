//! Command-line entry point: load an instance, run the search, report.

use clap::Parser;
use ga_cvrp::utils::{format_duration, print_route_grid, save_solution, SolutionReport};
use ga_cvrp::{genetic_algorithm, GaConfig, Problem};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "ga_cvrp", version, about = "Genetic algorithm CVRP solver")]
struct Args {
    /// Path to the instance file (semicolon-separated: node_id;demand;x;y)
    instance: PathBuf,

    /// Vehicle capacity shared by the whole fleet
    #[arg(short, long)]
    capacity: f64,

    /// Number of generations
    #[arg(long, default_value_t = 500)]
    generations: usize,

    /// Population size
    #[arg(long, default_value_t = 20)]
    population: usize,

    /// Number of elite chromosomes carried over each generation
    #[arg(long, default_value_t = 2)]
    keep_best: usize,

    /// Crossover probability
    #[arg(long, default_value_t = 0.25)]
    crossover_rate: f64,

    /// Mutation probability
    #[arg(long, default_value_t = 0.1)]
    mutation_rate: f64,

    /// Worker threads for child generation (1 = sequential)
    #[arg(long, default_value_t = 4)]
    cores: usize,

    /// Log the best distance after every generation
    #[arg(short, long)]
    verbose: bool,

    /// Write the best solution to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the solution as JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Draw an ascii map of the routes
    #[arg(long)]
    plot: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let problem = Problem::from_csv(&args.instance, args.capacity)?;
    println!(
        "Loaded instance {} with {} customers",
        problem.name,
        problem.customer_count()
    );

    let config = GaConfig::new()
        .with_n_generations(args.generations)
        .with_n_population(args.population)
        .with_keep_best(args.keep_best)
        .with_crossover_rate(args.crossover_rate)
        .with_mutation_rate(args.mutation_rate)
        .with_n_cores(args.cores)
        .with_verbose(args.verbose);

    let start = Instant::now();
    let best = genetic_algorithm(&problem, &config)?;
    println!("Search completed in {}", format_duration(start.elapsed()));

    if args.json {
        let report = SolutionReport::new(&best, &problem);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", best.summary(&problem));
    }

    if args.plot {
        print_route_grid(&best, &problem);
    }

    if let Some(path) = &args.output {
        save_solution(&best, &problem, path)?;
        println!("Solution written to {}", path.display());
    }

    Ok(())
}
