use std::collections::VecDeque;

use crate::error::Result;
use crate::graph::{Graph, NodeIndex};

impl Graph {
    /// Depth-first visitation order from `start`.
    ///
    /// A node is marked visited when it is first entered and its neighbors are
    /// explored in adjacency order, so the result matches the recursive
    /// preorder. Only nodes reachable from `start` are listed, each once.
    pub fn dfs(&self, start: NodeIndex) -> Result<Vec<NodeIndex>> {
        self.check_index(start)?;
        let mut visited = vec![false; self.node_count()];
        let order = depth_first(self, start, &mut visited);
        tracing::trace!(start, visited = order.len(), "dfs");
        Ok(order)
    }

    /// Breadth-first visitation order from `start`.
    ///
    /// Nodes are marked visited at enqueue time and enqueued in adjacency
    /// order.
    pub fn bfs(&self, start: NodeIndex) -> Result<Vec<NodeIndex>> {
        self.check_index(start)?;

        let mut visited = vec![false; self.node_count()];
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        let mut order = Vec::new();

        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            order.push(current);
            for neighbor in self.neighbors(current) {
                if !visited[neighbor.target] {
                    visited[neighbor.target] = true;
                    queue.push_back(neighbor.target);
                }
            }
        }

        tracing::trace!(start, visited = order.len(), "bfs");
        Ok(order)
    }

    /// [`Graph::dfs`] with node names instead of indices.
    pub fn dfs_names(&self, start: NodeIndex) -> Result<Vec<&str>> {
        Ok(self.to_names(&self.dfs(start)?))
    }

    /// [`Graph::bfs`] with node names instead of indices.
    pub fn bfs_names(&self, start: NodeIndex) -> Result<Vec<&str>> {
        Ok(self.to_names(&self.bfs(start)?))
    }

    pub(crate) fn to_names(&self, indices: &[NodeIndex]) -> Vec<&str> {
        indices
            .iter()
            .map(|&i| self.nodes()[i].name())
            .collect()
    }
}

/// Depth-first preorder from `start`, skipping and updating `visited`.
///
/// Uses an explicit stack of (node, adjacency cursor) frames instead of
/// recursion so long chains cannot overflow the call stack. Shared with the
/// component and connectivity queries, which reuse one `visited` table across
/// several starts.
pub(crate) fn depth_first(
    graph: &Graph,
    start: NodeIndex,
    visited: &mut [bool],
) -> Vec<NodeIndex> {
    let mut order = Vec::new();
    if visited[start] {
        return order;
    }

    visited[start] = true;
    order.push(start);
    let mut stack: Vec<(NodeIndex, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        match graph.neighbors(node).get(cursor) {
            Some(neighbor) => {
                frame.1 += 1;
                let next = neighbor.target;
                if !visited[next] {
                    visited[next] = true;
                    order.push(next);
                    stack.push((next, 0));
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    order
}
