//! Command-line arguments for graph-cities.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::dataset::NodeRef;

/// Explore a network of cities with graph traversals and shortest paths
#[derive(Parser, Debug)]
#[command(name = "graph-cities")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON dataset file (defaults to the built-in cities network)
    #[arg(long, global = true, env = "GRAPH_CITIES_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "human",
        env = "GRAPH_CITIES_FORMAT"
    )]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "trace", "graph_cities_core=debug")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every edge with node names
    Edges,

    /// Show each node's neighbors and edge weights
    Adjacency,

    /// Print the adjacency matrix
    Matrix,

    /// Depth-first visitation order
    Dfs {
        /// Start node (index or name)
        #[arg(value_parser = parse_node_ref)]
        start: NodeRef,
    },

    /// Breadth-first visitation order
    Bfs {
        /// Start node (index or name)
        #[arg(value_parser = parse_node_ref)]
        start: NodeRef,
    },

    /// Shortest path between two nodes
    Path {
        /// Start node (index or name)
        #[arg(value_parser = parse_node_ref)]
        from: NodeRef,

        /// Destination node (index or name)
        #[arg(value_parser = parse_node_ref)]
        to: NodeRef,
    },

    /// Shortest paths from one node to every node
    Paths {
        /// Start node (index or name)
        #[arg(value_parser = parse_node_ref)]
        from: NodeRef,
    },

    /// List connected components
    Components,

    /// Rank nodes by degree
    Degree {
        /// Only show the top N nodes (0 = all)
        #[arg(long, default_value_t = 0)]
        top: usize,
    },

    /// Summary statistics
    Stats,
}

/// Numeric arguments are node indices, anything else is a node name.
fn parse_node_ref(s: &str) -> Result<NodeRef, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("node must be an index or a name".to_string());
    }
    Ok(match s.parse::<usize>() {
        Ok(index) => NodeRef::Index(index),
        Err(_) => NodeRef::Name(s.to_string()),
    })
}
