//! Node names and edge triples fed into the graph.
//!
//! Either the built-in cities network or a JSON file of the form
//! `{ "nodes": [...], "edges": [{ "weight": 51, "from": 0, "to": "San Francisco" }] }`.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use graph_cities_core::{Graph, NodeIndex};
use serde::Deserialize;

/// A node referenced by index or by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    Index(NodeIndex),
    Name(String),
}

impl NodeRef {
    /// Map a name to its index. Indices are passed through unchanged and
    /// validated by the graph operation that receives them.
    pub fn resolve(&self, graph: &Graph) -> anyhow::Result<NodeIndex> {
        match self {
            NodeRef::Index(index) => Ok(*index),
            NodeRef::Name(name) => graph
                .find_node(name)
                .ok_or_else(|| anyhow!("unknown node name '{}'", name)),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Index(index) => write!(f, "{}", index),
            NodeRef::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeSpec {
    pub weight: f64,
    pub from: NodeRef,
    pub to: NodeRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

const CITIES: [&str; 7] = [
    "Mountain View",
    "San Francisco",
    "London",
    "Shanghai",
    "Berlin",
    "Sao Paolo",
    "Bangalore",
];

/// (distance, from, to). Bangalore is intentionally left isolated.
const CITY_CONNECTIONS: [(f64, NodeIndex, NodeIndex); 8] = [
    (51.0, 0, 1),
    (9950.0, 0, 3),
    (10375.0, 0, 5),
    (9900.0, 1, 3),
    (9130.0, 1, 4),
    (9217.0, 2, 3),
    (932.0, 2, 4),
    (9471.0, 2, 5),
];

impl Dataset {
    pub fn cities() -> Self {
        Self {
            nodes: CITIES.iter().map(|s| s.to_string()).collect(),
            edges: CITY_CONNECTIONS
                .iter()
                .map(|&(weight, from, to)| EdgeSpec {
                    weight,
                    from: NodeRef::Index(from),
                    to: NodeRef::Index(to),
                })
                .collect(),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;
        let dataset: Dataset = serde_json::from_str(&text)
            .with_context(|| format!("invalid dataset {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            nodes = dataset.nodes.len(),
            edges = dataset.edges.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Load `path` if given, otherwise the built-in cities network.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::cities()),
        }
    }

    pub fn build(&self) -> anyhow::Result<Graph> {
        let mut graph = Graph::with_capacity(self.nodes.len(), self.edges.len());
        graph.set_node_names(self.nodes.iter().cloned());

        for (i, edge) in self.edges.iter().enumerate() {
            let from = edge.from.resolve(&graph)?;
            let to = edge.to.resolve(&graph)?;
            graph
                .insert_edge(edge.weight, from, to)
                .with_context(|| format!("edge #{} ({} -- {})", i, edge.from, edge.to))?;
        }

        Ok(graph)
    }
}
