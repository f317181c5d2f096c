use thiserror::Error;

use crate::graph::NodeIndex;

/// Errors returned by graph construction and queries.
///
/// A failed call never leaves the graph partially updated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("node index {index} out of range (graph has {node_count} nodes)")]
    OutOfRange { index: NodeIndex, node_count: usize },

    #[error("no path from node {from} to node {to}")]
    NoPath { from: NodeIndex, to: NodeIndex },

    #[error("edge weight must be finite, got {weight}")]
    InvalidWeight { weight: f64 },
}

pub type Result<T> = std::result::Result<T, GraphError>;
