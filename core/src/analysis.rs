use std::collections::HashSet;

use serde::Serialize;

use crate::error::Result;
use crate::graph::{EdgeIndex, Graph, NodeIndex};
use crate::traversal::depth_first;

/// Degree information for a single node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeResult {
    pub index: NodeIndex,
    pub name: String,
    pub degree: usize,
}

/// Min / max / mean node degree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeSummary {
    pub min: usize,
    pub max: usize,
    pub avg: f64,
}

/// Aggregate statistics over the whole graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Distinct unordered node pairs joined by at least one edge.
    pub connection_count: usize,
    pub is_connected: bool,
    pub has_cycle: bool,
    pub density: f64,
    pub component_count: usize,
    /// None for an empty graph.
    pub degree: Option<DegreeSummary>,
}

impl Graph {
    /// True when every node is reachable from node 0. An empty graph is connected.
    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let mut visited = vec![false; self.node_count()];
        depth_first(self, 0, &mut visited).len() == self.node_count()
    }

    /// Connected components ordered by their lowest node index, each in DFS
    /// order from that node.
    pub fn connected_components(&self) -> Vec<Vec<NodeIndex>> {
        let mut visited = vec![false; self.node_count()];
        let mut components = Vec::new();
        for start in 0..self.node_count() {
            if !visited[start] {
                components.push(depth_first(self, start, &mut visited));
            }
        }
        components
    }

    /// True if any component contains a cycle.
    ///
    /// A cycle is a visited neighbor reached through any edge other than the
    /// tree edge used to enter the current node, so self-loops and parallel
    /// edges both count.
    pub fn has_cycle(&self) -> bool {
        let n = self.node_count();
        let mut visited = vec![false; n];

        for root in 0..n {
            if visited[root] {
                continue;
            }
            visited[root] = true;
            // (node, tree edge used to enter it, adjacency cursor)
            let mut stack: Vec<(NodeIndex, Option<EdgeIndex>, usize)> = vec![(root, None, 0)];

            while let Some(frame) = stack.last_mut() {
                let (node, via, cursor) = *frame;
                let Some(neighbor) = self.neighbors(node).get(cursor) else {
                    stack.pop();
                    continue;
                };
                frame.2 += 1;

                if via == Some(neighbor.edge) {
                    continue;
                }
                if visited[neighbor.target] {
                    tracing::trace!(node, neighbor = neighbor.target, "cycle found");
                    return true;
                }
                visited[neighbor.target] = true;
                stack.push((neighbor.target, Some(neighbor.edge), 0));
            }
        }

        false
    }

    /// Number of edges incident to `index`; a self-loop counts once.
    pub fn degree(&self, index: NodeIndex) -> Result<usize> {
        self.check_index(index)?;
        Ok(self.neighbors(index).len())
    }

    /// Nodes ranked by degree.
    ///
    /// If `top_n` is 0, returns all nodes. Otherwise returns the top N by
    /// degree (descending). Ties are broken by node index (ascending).
    pub fn degree_ranking(&self, top_n: usize) -> Vec<DegreeResult> {
        let mut results: Vec<DegreeResult> = self
            .nodes()
            .iter()
            .map(|node| DegreeResult {
                index: node.index(),
                name: node.name().to_string(),
                degree: self.neighbors(node.index()).len(),
            })
            .collect();

        results.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.index.cmp(&b.index)));

        if top_n > 0 && top_n < results.len() {
            results.truncate(top_n);
        }

        results
    }

    /// Distinct unordered node pairs joined by an edge, self-loops excluded.
    pub fn connection_count(&self) -> usize {
        self.edges()
            .iter()
            .filter(|e| e.from_index() != e.to_index())
            .map(|e| {
                let (a, b) = (e.from_index(), e.to_index());
                (a.min(b), a.max(b))
            })
            .collect::<HashSet<_>>()
            .len()
    }

    /// Ratio of connected node pairs to all possible pairs, in [0, 1].
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n < 2 {
            return 0.0;
        }
        let max_pairs = n * (n - 1) / 2;
        self.connection_count() as f64 / max_pairs as f64
    }

    pub fn stats(&self) -> GraphStats {
        let degrees: Vec<usize> = (0..self.node_count())
            .map(|i| self.neighbors(i).len())
            .collect();

        let degree = match (degrees.iter().min(), degrees.iter().max()) {
            (Some(&min), Some(&max)) => Some(DegreeSummary {
                min,
                max,
                avg: degrees.iter().sum::<usize>() as f64 / degrees.len() as f64,
            }),
            _ => None,
        };

        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            connection_count: self.connection_count(),
            is_connected: self.is_connected(),
            has_cycle: self.has_cycle(),
            density: self.density(),
            component_count: self.connected_components().len(),
            degree,
        }
    }
}
