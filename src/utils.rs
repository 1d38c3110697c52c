//! Reporting helpers: solution export, JSON report, terminal plot.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::chromosome::Chromosome;
use crate::problem::Problem;
use serde::Serialize;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Write a human-readable solution file: one block per route with the
/// depot-bracketed node-id sequence, distance, and load.
pub fn save_solution<P: AsRef<Path>>(
    solution: &Chromosome,
    problem: &Problem,
    path: P,
) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    let depot_id = problem.depot().id;

    writeln!(file, "CVRP solution for instance: {}", problem.name)?;
    writeln!(file, "Total distance: {:.2}", solution.distance())?;
    writeln!(file, "Number of routes: {}", solution.route_count())?;
    writeln!(file)?;

    for (i, route) in solution.routes().iter().enumerate() {
        write!(file, "Route #{}: {}", i + 1, depot_id)?;

        for &customer in route.customers() {
            write!(file, " -> {}", problem.nodes[customer].id)?;
        }

        writeln!(file, " -> {}", depot_id)?;
        writeln!(file, "  Distance: {:.2}", route.distance())?;
        writeln!(
            file,
            "  Load: {:.2} / {:.2}",
            route.load(),
            problem.vehicle_capacity
        )?;
        writeln!(file)?;
    }

    Ok(())
}

/// Serializable view of a solution for JSON output.
#[derive(Debug, Serialize)]
pub struct SolutionReport {
    pub instance: String,
    pub distance: f64,
    pub routes: Vec<RouteReport>,
}

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub nodes: Vec<usize>,
    pub distance: f64,
    pub load: f64,
}

impl SolutionReport {
    pub fn new(solution: &Chromosome, problem: &Problem) -> Self {
        SolutionReport {
            instance: problem.name.clone(),
            distance: solution.distance(),
            routes: solution
                .routes()
                .iter()
                .map(|route| RouteReport {
                    nodes: route
                        .customers()
                        .iter()
                        .map(|&c| problem.nodes[c].id)
                        .collect(),
                    distance: route.distance(),
                    load: route.load(),
                })
                .collect(),
        }
    }
}

/// Print an ascii map of the routes, one glyph per route.
pub fn print_route_grid(solution: &Chromosome, problem: &Problem) {
    println!("Routes for {}", problem.name);
    println!("Total distance: {:.2}", solution.distance());
    println!("Number of routes: {}", solution.route_count());
    println!();

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for node in &problem.nodes {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.x);
        max_y = max_y.max(node.y);
    }

    let width = 80;
    let height = 25;
    let span_x = (max_x - min_x).max(f64::EPSILON);
    let span_y = (max_y - min_y).max(f64::EPSILON);

    let to_cell = |x: f64, y: f64| {
        let col = ((x - min_x) / span_x * (width as f64 - 1.0)) as usize;
        let row = ((y - min_y) / span_y * (height as f64 - 1.0)) as usize;
        (row, col)
    };

    let mut grid = vec![vec![' '; width]; height];

    let route_glyphs = ['*', '+', 'x', '#', '@', '&', '%', '=', '^', '$'];

    for (r_idx, route) in solution.routes().iter().enumerate() {
        let glyph = route_glyphs[r_idx % route_glyphs.len()];

        for &customer in route.customers() {
            let node = &problem.nodes[customer];
            let (row, col) = to_cell(node.x, node.y);
            grid[row][col] = glyph;
        }
    }

    let depot = problem.depot();
    let (depot_row, depot_col) = to_cell(depot.x, depot.y);
    grid[depot_row][depot_col] = 'D';

    for row in &grid {
        println!("{}", row.iter().collect::<String>());
    }
    println!();

    println!("Legend:");
    println!("D - Depot");
    for r_idx in 0..solution.route_count().min(route_glyphs.len()) {
        println!("{} - Route #{}", route_glyphs[r_idx], r_idx + 1);
    }
    println!();
}
