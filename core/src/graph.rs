use std::fmt;

use serde::Serialize;

use crate::error::{GraphError, Result};

/// Dense node identifier, assigned by the graph in insertion order.
pub type NodeIndex = usize;

/// Position of an edge in the graph's edge list.
pub type EdgeIndex = usize;

/// A labeled vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    index: NodeIndex,
    name: String,
}

impl Node {
    pub(crate) fn new(index: NodeIndex, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A weighted undirected connection between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    weight: f64,
    from_index: NodeIndex,
    to_index: NodeIndex,
}

impl Edge {
    pub(crate) fn new(weight: f64, from_index: NodeIndex, to_index: NodeIndex) -> Self {
        Self {
            weight,
            from_index,
            to_index,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn from_index(&self) -> NodeIndex {
        self.from_index
    }

    pub fn to_index(&self) -> NodeIndex {
        self.to_index
    }

    /// The endpoint opposite `index`, or None if `index` is not an endpoint.
    pub fn other_end(&self, index: NodeIndex) -> Option<NodeIndex> {
        if index == self.from_index {
            Some(self.to_index)
        } else if index == self.to_index {
            Some(self.from_index)
        } else {
            None
        }
    }
}

/// One entry in a node's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub target: NodeIndex,
    pub weight: f64,
    /// The edge this entry was derived from.
    pub edge: EdgeIndex,
}

/// In-memory undirected graph: nodes, edges, and the adjacency view derived
/// from them.
///
/// `adjacency[i]` lists the neighbors of node `i` in edge insertion order.
/// Each edge is recorded under both endpoints; a self-loop is recorded once.
/// The graph is append-only apart from [`Graph::set_node_names`], which
/// replaces everything.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Neighbor>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_count),
            edges: Vec::with_capacity(edge_count),
            adjacency: Vec::with_capacity(node_count),
        }
    }

    /// Replace the node set with one node per name, indexed 0..n-1 in order.
    ///
    /// Existing edges reference the old indices, so they are discarded too.
    pub fn set_node_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.edges.is_empty() {
            tracing::warn!(
                discarded_edges = self.edges.len(),
                "replacing node names clears existing edges"
            );
        }
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();

        for name in names {
            self.add_node(name);
        }
        tracing::debug!(node_count = self.nodes.len(), "node names set");
    }

    /// Append a node, returning its index.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, name));
        self.adjacency.push(Vec::new());
        index
    }

    /// Insert an undirected edge between two existing nodes.
    ///
    /// Returns the new edge's index. Fails without modifying the graph if
    /// either endpoint is unknown or the weight is not finite.
    pub fn insert_edge(
        &mut self,
        weight: f64,
        from_index: NodeIndex,
        to_index: NodeIndex,
    ) -> Result<EdgeIndex> {
        self.check_index(from_index)?;
        self.check_index(to_index)?;
        if !weight.is_finite() {
            return Err(GraphError::InvalidWeight { weight });
        }

        let edge = self.edges.len();
        self.edges.push(Edge::new(weight, from_index, to_index));
        self.adjacency[from_index].push(Neighbor {
            target: to_index,
            weight,
            edge,
        });
        if from_index != to_index {
            self.adjacency[to_index].push(Neighbor {
                target: from_index,
                weight,
                edge,
            });
        }

        tracing::debug!(edge, from = from_index, to = to_index, weight, "edge inserted");
        Ok(edge)
    }

    /// Fail with `OutOfRange` unless `index` names an existing node.
    pub fn check_index(&self, index: NodeIndex) -> Result<()> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::OutOfRange {
                index,
                node_count: self.nodes.len(),
            })
        }
    }

    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Name of the node at `index`.
    pub fn name(&self, index: NodeIndex) -> Result<&str> {
        self.check_index(index)?;
        Ok(self.nodes[index].name())
    }

    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(Node::name).collect()
    }

    /// Index of the first node carrying `name`.
    pub fn find_node(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// Adjacency entries for a node. Empty for unknown indices.
    pub fn neighbors(&self, index: NodeIndex) -> &[Neighbor] {
        self.adjacency
            .get(index)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges as (weight, from, to) triples in insertion order.
    pub fn edge_list(&self) -> Vec<(f64, NodeIndex, NodeIndex)> {
        self.edges
            .iter()
            .map(|e| (e.weight, e.from_index, e.to_index))
            .collect()
    }

    /// Edges as (weight, from name, to name) triples in insertion order.
    pub fn edge_list_names(&self) -> Vec<(f64, &str, &str)> {
        self.edges
            .iter()
            .map(|e| {
                (
                    e.weight,
                    self.nodes[e.from_index].name(),
                    self.nodes[e.to_index].name(),
                )
            })
            .collect()
    }

    /// Per node, its (neighbor, weight) pairs. Isolated nodes get an empty list.
    pub fn adjacency_list(&self) -> Vec<Vec<(NodeIndex, f64)>> {
        self.adjacency
            .iter()
            .map(|entries| entries.iter().map(|n| (n.target, n.weight)).collect())
            .collect()
    }

    /// Same as [`Graph::adjacency_list`] with neighbor names instead of indices.
    pub fn adjacency_list_names(&self) -> Vec<Vec<(&str, f64)>> {
        self.adjacency
            .iter()
            .map(|entries| {
                entries
                    .iter()
                    .map(|n| (self.nodes[n.target].name(), n.weight))
                    .collect()
            })
            .collect()
    }

    /// Symmetric n x n weight matrix, 0.0 where no edge exists.
    ///
    /// For parallel edges the most recently inserted weight wins.
    pub fn adjacency_matrix(&self) -> Vec<Vec<f64>> {
        let n = self.nodes.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for e in &self.edges {
            matrix[e.from_index][e.to_index] = e.weight;
            matrix[e.to_index][e.from_index] = e.weight;
        }
        matrix
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph(nodes={}, edges={})",
            self.nodes.len(),
            self.edges.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut g = Graph::new();
        g.set_node_names(["New York", "Los Angeles", "Chicago"]);
        g.insert_edge(2445.0, 0, 1).unwrap();
        g.insert_edge(713.0, 0, 2).unwrap();
        g.insert_edge(1745.0, 1, 2).unwrap();
        g
    }

    #[test]
    fn test_set_node_names_assigns_dense_indices() {
        let g = triangle();
        assert_eq!(g.node_count(), 3);
        for (i, node) in g.nodes().iter().enumerate() {
            assert_eq!(node.index(), i);
        }
        assert_eq!(g.name(2).unwrap(), "Chicago");
    }

    #[test]
    fn test_set_node_names_replaces_and_clears_edges() {
        let mut g = triangle();
        g.set_node_names(["A", "B"]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors(0).is_empty());
        assert!(g.neighbors(2).is_empty());
        assert_eq!(g.names(), vec!["A", "B"]);
    }

    #[test]
    fn test_add_node_appends() {
        let mut g = triangle();
        let idx = g.add_node("Denver");
        assert_eq!(idx, 3);
        assert_eq!(g.edge_count(), 3);
        assert!(g.neighbors(3).is_empty());
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let mut g = Graph::new();
        g.set_node_names(["Springfield", "Springfield"]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.find_node("Springfield"), Some(0));
    }

    #[test]
    fn test_insert_edge_is_undirected() {
        let g = triangle();
        let from_0: Vec<NodeIndex> = g.neighbors(0).iter().map(|n| n.target).collect();
        let from_1: Vec<NodeIndex> = g.neighbors(1).iter().map(|n| n.target).collect();
        assert_eq!(from_0, vec![1, 2]);
        assert_eq!(from_1, vec![0, 2]);
        assert_eq!(g.neighbors(2)[1].weight, 1745.0);
        assert_eq!(g.neighbors(2)[1].edge, 2);
    }

    #[test]
    fn test_insert_edge_out_of_range_leaves_graph_unchanged() {
        let mut g = triangle();
        let err = g.insert_edge(10.0, 0, 3).unwrap_err();
        assert_eq!(
            err,
            GraphError::OutOfRange {
                index: 3,
                node_count: 3
            }
        );
        assert!(g.insert_edge(10.0, 7, 0).is_err());
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.neighbors(0).len(), 2);
    }

    #[test]
    fn test_insert_edge_rejects_non_finite_weight() {
        let mut g = triangle();
        assert!(matches!(
            g.insert_edge(f64::NAN, 0, 1),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(g.insert_edge(f64::INFINITY, 0, 1).is_err());
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_insert_edge_on_empty_graph() {
        let mut g = Graph::new();
        assert!(g.insert_edge(1.0, 0, 0).is_err());
    }

    #[test]
    fn test_self_loop_recorded_once() {
        let mut g = Graph::new();
        g.set_node_names(["A"]);
        g.insert_edge(4.0, 0, 0).unwrap();
        assert_eq!(g.neighbors(0).len(), 1);
        assert_eq!(g.edges()[0].other_end(0), Some(0));
    }

    #[test]
    fn test_other_end() {
        let g = triangle();
        let e = g.edges()[1];
        assert_eq!(e.other_end(0), Some(2));
        assert_eq!(e.other_end(2), Some(0));
        assert_eq!(e.other_end(1), None);
    }

    #[test]
    fn test_edge_list_names() {
        let g = triangle();
        assert_eq!(g.edge_list()[1], (713.0, 0, 2));
        assert_eq!(
            g.edge_list_names()[0],
            (2445.0, "New York", "Los Angeles")
        );
    }

    #[test]
    fn test_adjacency_list_isolated_node() {
        let mut g = triangle();
        g.add_node("Anchorage");
        let adj = g.adjacency_list();
        assert_eq!(adj.len(), 4);
        assert_eq!(adj[0], vec![(1, 2445.0), (2, 713.0)]);
        assert!(adj[3].is_empty());
        let named = g.adjacency_list_names();
        assert_eq!(named[2], vec![("New York", 713.0), ("Los Angeles", 1745.0)]);
    }

    #[test]
    fn test_adjacency_matrix_symmetric() {
        let g = triangle();
        let m = g.adjacency_matrix();
        assert_eq!(m[0][1], 2445.0);
        assert_eq!(m[1][0], 2445.0);
        assert_eq!(m[1][2], 1745.0);
        assert_eq!(m[0][0], 0.0);
    }

    #[test]
    fn test_name_out_of_range() {
        let g = triangle();
        assert!(g.name(3).is_err());
        assert!(g.node(3).is_none());
        assert!(g.neighbors(99).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(triangle().to_string(), "Graph(nodes=3, edges=3)");
        assert_eq!(triangle().nodes()[1].to_string(), "Los Angeles");
    }
}
