use crate::traits::NodeId;

// ---------------------------------------------------------------------------
// Internal node for A* priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) f: f64,
    pub(crate) parent: NodeId,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0.0,
            f: 0.0,
            parent: NO_PARENT,
            generation: 0,
            open: false,
        }
    }
}

pub(crate) const NO_PARENT: NodeId = usize::MAX;

/// Reference into the node array, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy)]
pub(crate) struct NodeRef {
    pub(crate) idx: NodeId,
    pub(crate) f: f64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first.
        other.f.total_cmp(&self.f)
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// SearchCache
// ---------------------------------------------------------------------------

/// Scratch memory for searches over a graph of `len` nodes.
///
/// `SearchCache` owns the node array, the connected-component labels and
/// the neighbor buffer so that repeated queries incur no allocations after
/// the first use. A cache is not tied to a particular graph, only to its
/// node count; [`resize`](Self::resize) adapts it to another graph.
pub struct SearchCache {
    pub(crate) len: usize,
    // A* caches
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    // CC caches
    pub(crate) cc_labels: Vec<i32>,
    pub(crate) cc_stack: Vec<NodeId>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<NodeId>,
}

impl SearchCache {
    /// Create a cache for a graph with `len` nodes.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            astar_nodes: vec![Node::default(); len],
            astar_generation: 0,
            cc_labels: vec![-1; len],
            cc_stack: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Adapt the cache to a graph with `len` nodes.
    ///
    /// If `len` fits within the existing capacity only the generation counter
    /// is bumped so stale entries are ignored. Otherwise the node arrays are
    /// reallocated.
    pub fn resize(&mut self, len: usize) {
        let old_capacity = self.astar_nodes.len();
        self.len = len;

        if len <= old_capacity {
            self.astar_generation = self.astar_generation.wrapping_add(1);
            return;
        }

        self.astar_nodes.clear();
        self.astar_nodes.resize(len, Node::default());
        self.astar_generation = 0;

        self.cc_labels.clear();
        self.cc_labels.resize(len, -1);
        self.cc_stack.clear();
    }

    /// Number of nodes the cache currently covers.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the cache covers no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `n` is a valid node id for the current size.
    #[inline]
    pub(crate) fn contains(&self, n: NodeId) -> bool {
        n < self.len
    }
}
