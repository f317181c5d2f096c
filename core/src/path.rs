use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeIndex};

/// A shortest path between two nodes, endpoints included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    pub path: Vec<NodeIndex>,
    pub distance: f64,
}

impl ShortestPath {
    /// The path rendered as node names.
    pub fn names<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        graph.to_names(&self.path)
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Result of a full single-source Dijkstra run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dijkstra {
    pub start: NodeIndex,
    /// Final distance per node; None if unreachable from `start`.
    pub distances: Vec<Option<f64>>,
    /// Predecessor on one shortest path; None for `start` and unreachable nodes.
    pub predecessors: Vec<Option<NodeIndex>>,
}

impl Dijkstra {
    pub fn distance(&self, node: NodeIndex) -> Option<f64> {
        self.distances.get(node).copied().flatten()
    }

    /// Walk predecessors back from `end`. None if `end` is unreachable.
    pub fn path_to(&self, end: NodeIndex) -> Option<ShortestPath> {
        let distance = self.distance(end)?;
        Some(ShortestPath {
            path: reconstruct(&self.predecessors, self.start, end),
            distance,
        })
    }
}

/// Min-heap entry: ordered by tentative distance, then by node index so that
/// equal distances pop the lowest index first.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    distance: f64,
    node: NodeIndex,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.node.cmp(&other.node))
    }
}

/// Tentative distances and predecessors after a (possibly early-stopped) run.
struct Relaxation {
    distances: Vec<f64>,
    predecessors: Vec<Option<NodeIndex>>,
}

impl Graph {
    /// Shortest distances from `start` to every node.
    pub fn dijkstra(&self, start: NodeIndex) -> Result<Dijkstra> {
        self.check_index(start)?;
        let run = relax(self, start, None);
        Ok(Dijkstra {
            start,
            distances: run
                .distances
                .into_iter()
                .map(|d| d.is_finite().then_some(d))
                .collect(),
            predecessors: run.predecessors,
        })
    }

    /// Minimum-weight path from `start` to `end`.
    ///
    /// Fails with `OutOfRange` for an unknown endpoint and `NoPath` when `end`
    /// is not reachable. Weights are assumed non-negative.
    #[tracing::instrument(skip(self), fields(node_count = self.node_count()))]
    pub fn shortest_path(&self, start: NodeIndex, end: NodeIndex) -> Result<ShortestPath> {
        self.check_index(start)?;
        self.check_index(end)?;

        let run = relax(self, start, Some(end));
        let distance = run.distances[end];
        if !distance.is_finite() {
            tracing::debug!("target unreachable");
            return Err(GraphError::NoPath {
                from: start,
                to: end,
            });
        }

        let path = reconstruct(&run.predecessors, start, end);
        tracing::debug!(distance, hops = path.len() - 1, "shortest path found");
        Ok(ShortestPath { path, distance })
    }
}

/// Dijkstra relaxation from `start`, stopping once `target` is finalized.
fn relax(graph: &Graph, start: NodeIndex, target: Option<NodeIndex>) -> Relaxation {
    let n = graph.node_count();
    let mut distances = vec![f64::INFINITY; n];
    let mut predecessors: Vec<Option<NodeIndex>> = vec![None; n];
    let mut finalized = vec![false; n];
    let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::new();

    distances[start] = 0.0;
    heap.push(Reverse(HeapEntry {
        distance: 0.0,
        node: start,
    }));

    while let Some(Reverse(HeapEntry { distance, node })) = heap.pop() {
        // Stale entry left behind by a later improvement
        if finalized[node] {
            continue;
        }
        finalized[node] = true;

        if target == Some(node) {
            break;
        }

        for neighbor in graph.neighbors(node) {
            if finalized[neighbor.target] {
                continue;
            }
            let candidate = distance + neighbor.weight;
            if candidate < distances[neighbor.target] {
                distances[neighbor.target] = candidate;
                predecessors[neighbor.target] = Some(node);
                heap.push(Reverse(HeapEntry {
                    distance: candidate,
                    node: neighbor.target,
                }));
            }
        }
    }

    Relaxation {
        distances,
        predecessors,
    }
}

/// Walk predecessor pointers from `end` back to `start`, then reverse.
fn reconstruct(
    predecessors: &[Option<NodeIndex>],
    start: NodeIndex,
    end: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        match predecessors[current] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(n: usize) -> Graph {
        let mut g = Graph::new();
        g.set_node_names((0..n).map(|i| format!("N{}", i)));
        g
    }

    fn triangle() -> Graph {
        let mut g = Graph::new();
        g.set_node_names(["New York", "Los Angeles", "Chicago"]);
        g.insert_edge(2445.0, 0, 1).unwrap();
        g.insert_edge(713.0, 0, 2).unwrap();
        g.insert_edge(1745.0, 1, 2).unwrap();
        g
    }

    /// A-B 1, A-C 10, B-D 1, C-D 1
    fn make_diamond() -> Graph {
        let mut g = Graph::new();
        g.set_node_names(["A", "B", "C", "D"]);
        g.insert_edge(1.0, 0, 1).unwrap();
        g.insert_edge(10.0, 0, 2).unwrap();
        g.insert_edge(1.0, 1, 3).unwrap();
        g.insert_edge(1.0, 2, 3).unwrap();
        g
    }

    /// Sum of edge weights along `path`, taking the cheapest parallel edge.
    fn path_weight(g: &Graph, path: &[NodeIndex]) -> f64 {
        path.windows(2)
            .map(|pair| {
                g.neighbors(pair[0])
                    .iter()
                    .filter(|n| n.target == pair[1])
                    .map(|n| n.weight)
                    .fold(f64::INFINITY, f64::min)
            })
            .sum()
    }

    #[test]
    fn test_shortest_path_direct_edge_cheaper() {
        let g = triangle();
        let sp = g.shortest_path(0, 1).unwrap();
        assert_eq!(sp.path, vec![0, 1]);
        assert_eq!(sp.distance, 2445.0);
        assert_eq!(sp.names(&g), vec!["New York", "Los Angeles"]);
    }

    #[test]
    fn test_shortest_path_through_intermediate() {
        let g = make_diamond();
        let sp = g.shortest_path(0, 3).unwrap();
        assert_eq!(sp.path, vec![0, 1, 3]);
        assert_eq!(sp.distance, 2.0);

        let sp = g.shortest_path(0, 2).unwrap();
        assert_eq!(sp.path, vec![0, 1, 3, 2]);
        assert_eq!(sp.distance, 3.0);
        assert_eq!(sp.hops(), 3);
    }

    #[test]
    fn test_shortest_path_cheap_detour_beats_expensive_direct() {
        let mut g = named(5);
        g.insert_edge(10.0, 0, 4).unwrap();
        for i in 0..4 {
            g.insert_edge(2.0, i, i + 1).unwrap();
        }
        let sp = g.shortest_path(0, 4).unwrap();
        assert_eq!(sp.path, vec![0, 1, 2, 3, 4]);
        assert_eq!(sp.distance, 8.0);
    }

    #[test]
    fn test_shortest_path_self() {
        let g = triangle();
        for a in 0..3 {
            let sp = g.shortest_path(a, a).unwrap();
            assert_eq!(sp.path, vec![a]);
            assert_eq!(sp.distance, 0.0);
        }
    }

    #[test]
    fn test_shortest_path_no_path() {
        let mut g = named(4);
        g.insert_edge(1.0, 0, 1).unwrap();
        g.insert_edge(1.0, 2, 3).unwrap();
        assert_eq!(
            g.shortest_path(0, 3).unwrap_err(),
            GraphError::NoPath { from: 0, to: 3 }
        );
    }

    #[test]
    fn test_shortest_path_out_of_range() {
        let g = triangle();
        assert_eq!(
            g.shortest_path(9, 0).unwrap_err(),
            GraphError::OutOfRange {
                index: 9,
                node_count: 3
            }
        );
        assert!(matches!(
            g.shortest_path(0, 9),
            Err(GraphError::OutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_uniform_weight_matches_bfs_hops() {
        // 3x3 grid, every edge weight 5
        let mut g = named(9);
        for r in 0..3 {
            for c in 0..3 {
                let i = r * 3 + c;
                if c < 2 {
                    g.insert_edge(5.0, i, i + 1).unwrap();
                }
                if r < 2 {
                    g.insert_edge(5.0, i, i + 3).unwrap();
                }
            }
        }
        let sp = g.shortest_path(0, 8).unwrap();
        assert_eq!(sp.hops(), 4);
        assert_eq!(sp.distance, 20.0);
    }

    #[test]
    fn test_tie_break_prefers_lowest_index() {
        // Two equal-cost routes 0-1-3 and 0-2-3
        let mut g = named(4);
        g.insert_edge(1.0, 0, 2).unwrap();
        g.insert_edge(1.0, 0, 1).unwrap();
        g.insert_edge(1.0, 2, 3).unwrap();
        g.insert_edge(1.0, 1, 3).unwrap();
        let sp = g.shortest_path(0, 3).unwrap();
        assert_eq!(sp.path, vec![0, 1, 3]);
        assert_eq!(sp.distance, 2.0);
    }

    #[test]
    fn test_parallel_edges_use_cheapest() {
        let mut g = named(2);
        g.insert_edge(7.0, 0, 1).unwrap();
        g.insert_edge(3.0, 1, 0).unwrap();
        assert_eq!(g.shortest_path(0, 1).unwrap().distance, 3.0);
    }

    #[test]
    fn test_zero_weight_edges() {
        let mut g = named(3);
        g.insert_edge(0.0, 0, 1).unwrap();
        g.insert_edge(0.0, 1, 2).unwrap();
        let sp = g.shortest_path(0, 2).unwrap();
        assert_eq!(sp.path, vec![0, 1, 2]);
        assert_eq!(sp.distance, 0.0);
    }

    #[test]
    fn test_path_weights_sum_to_distance() {
        let mut g = named(6);
        for (w, a, b) in [
            (7.0, 0, 1),
            (9.0, 0, 2),
            (14.0, 0, 5),
            (10.0, 1, 2),
            (15.0, 1, 3),
            (11.0, 2, 3),
            (2.0, 2, 5),
            (6.0, 3, 4),
            (9.0, 4, 5),
        ] {
            g.insert_edge(w, a, b).unwrap();
        }
        let expected = [0.0, 7.0, 9.0, 20.0, 20.0, 11.0];
        for (end, &want) in expected.iter().enumerate() {
            let sp = g.shortest_path(0, end).unwrap();
            assert_eq!(sp.distance, want, "distance to {}", end);
            assert_eq!(path_weight(&g, &sp.path), sp.distance);
            assert_eq!(sp.path[0], 0);
            assert_eq!(*sp.path.last().unwrap(), end);
        }
    }

    #[test]
    fn test_dijkstra_all_distances() {
        let g = make_diamond();
        let result = g.dijkstra(0).unwrap();
        assert_eq!(result.distance(0), Some(0.0));
        assert_eq!(result.predecessors[0], None);
        assert_eq!(result.distance(1), Some(1.0));
        assert_eq!(result.predecessors[1], Some(0));
        assert_eq!(result.distance(2), Some(3.0));
        assert_eq!(result.predecessors[2], Some(3));
        assert_eq!(result.distance(3), Some(2.0));
        assert_eq!(result.predecessors[3], Some(1));
    }

    #[test]
    fn test_dijkstra_unreachable_is_none() {
        let mut g = make_diamond();
        let lonely = g.add_node("E");
        let result = g.dijkstra(0).unwrap();
        assert_eq!(result.distance(lonely), None);
        assert_eq!(result.predecessors[lonely], None);
        assert!(result.path_to(lonely).is_none());
        assert_eq!(result.path_to(2).unwrap().path, vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_dijkstra_agrees_with_shortest_path() {
        let g = make_diamond();
        let all = g.dijkstra(2).unwrap();
        for end in 0..4 {
            assert_eq!(all.path_to(end), Some(g.shortest_path(2, end).unwrap()));
        }
    }

    #[test]
    fn test_dijkstra_out_of_range() {
        assert!(Graph::new().dijkstra(0).is_err());
    }
}
