//! Small undirected adjacency-list graph used by the unit tests.

use crate::traits::{AstarPather, NodeId, Pather, WeightedPather};

pub(crate) struct TestGraph {
    adj: Vec<Vec<(NodeId, f64)>>,
}

impl TestGraph {
    pub(crate) fn new(n: usize, edges: &[(NodeId, NodeId, f64)]) -> Self {
        let mut adj = vec![Vec::new(); n];
        for &(a, b, w) in edges {
            adj[a].push((b, w));
            adj[b].push((a, w));
        }
        Self { adj }
    }
}

impl Pather for TestGraph {
    fn node_count(&self) -> usize {
        self.adj.len()
    }

    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>) {
        buf.extend(self.adj[n].iter().map(|&(m, _)| m));
    }
}

impl WeightedPather for TestGraph {
    fn cost(&self, from: NodeId, to: NodeId) -> f64 {
        self.adj[from]
            .iter()
            .find(|&&(m, _)| m == to)
            .map_or(f64::INFINITY, |&(_, w)| w)
    }
}

impl AstarPather for TestGraph {
    fn estimate(&self, _from: NodeId, _to: NodeId) -> f64 {
        0.0
    }
}
