/// Node handle: an index into the caller's vertex table.
pub type NodeId = usize;

/// Minimal search interface: neighbor enumeration.
pub trait Pather {
    /// Number of nodes; valid ids are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Append neighbors of `n` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>);
}

/// Pather with weighted (non-negative) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be finite and ≥ 0.
    fn cost(&self, from: NodeId, to: NodeId) -> f64;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: NodeId, to: NodeId) -> f64;
}
