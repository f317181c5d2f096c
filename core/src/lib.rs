//! graph-cities-core: In-memory weighted graph engine.
//!
//! A small library that maintains nodes, undirected weighted edges and the
//! adjacency view derived from them, and answers depth-first / breadth-first
//! traversal, Dijkstra shortest path, and connectivity/cycle/degree queries.
//! No I/O: callers supply node names and edge triples and render the results.
//!
//! ```
//! use graph_cities_core::Graph;
//!
//! let mut graph = Graph::new();
//! graph.set_node_names(["New York", "Los Angeles", "Chicago"]);
//! graph.insert_edge(2445.0, 0, 1)?;
//! graph.insert_edge(713.0, 0, 2)?;
//! graph.insert_edge(1745.0, 1, 2)?;
//!
//! let route = graph.shortest_path(0, 1)?;
//! assert_eq!(route.path, vec![0, 1]);
//! assert_eq!(route.distance, 2445.0);
//! assert_eq!(graph.bfs(0)?, vec![0, 1, 2]);
//! # Ok::<(), graph_cities_core::GraphError>(())
//! ```

mod analysis;
mod error;
mod graph;
mod path;
mod traversal;

pub use analysis::{DegreeResult, DegreeSummary, GraphStats};
pub use error::{GraphError, Result};
pub use graph::{Edge, EdgeIndex, Graph, Neighbor, Node, NodeIndex};
pub use path::{Dijkstra, ShortestPath};
