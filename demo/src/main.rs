//! graph-cities: command-line demo over graph-cities-core.
//!
//! Builds a graph from the built-in cities network (or a JSON dataset) and
//! prints traversals, shortest paths and statistics.

mod cli;
mod dataset;
mod logging;
mod output;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use cli::{Cli, Commands};
use dataset::Dataset;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let start = Instant::now();
    let dataset = Dataset::load(cli.dataset.as_deref())?;
    let graph = dataset.build()?;
    tracing::debug!(elapsed = ?start.elapsed(), graph = %graph, "graph built");

    let format = cli.format;
    match &cli.command {
        Commands::Edges => output::edges(&graph, format),
        Commands::Adjacency => output::adjacency(&graph, format),
        Commands::Matrix => output::matrix(&graph, format),
        Commands::Dfs { start } => {
            let index = start.resolve(&graph)?;
            let order = graph
                .dfs(index)
                .with_context(|| format!("depth-first search from {}", start))?;
            output::traversal(&graph, index, &order, format)
        }
        Commands::Bfs { start } => {
            let index = start.resolve(&graph)?;
            let order = graph
                .bfs(index)
                .with_context(|| format!("breadth-first search from {}", start))?;
            output::traversal(&graph, index, &order, format)
        }
        Commands::Path { from, to } => {
            let (a, b) = (from.resolve(&graph)?, to.resolve(&graph)?);
            let route = graph
                .shortest_path(a, b)
                .with_context(|| format!("shortest path from {} to {}", from, to))?;
            output::path(&graph, &route, format)
        }
        Commands::Paths { from } => {
            let a = from.resolve(&graph)?;
            let all = graph
                .dijkstra(a)
                .with_context(|| format!("shortest paths from {}", from))?;
            output::paths(&graph, &all, format)
        }
        Commands::Components => output::components(&graph, format),
        Commands::Degree { top } => output::degree(&graph, *top, format),
        Commands::Stats => output::stats(&graph, format),
    }
}
