use std::collections::BinaryHeap;

use crate::SearchCache;
use crate::cache::{NO_PARENT, NodeRef};
use crate::traits::{AstarPather, NodeId};

impl SearchCache {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if no path
    /// exists or either endpoint is not a node of the cached graph.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: NodeId,
        to: NodeId,
    ) -> Option<Vec<NodeId>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }

        if from == to {
            return Some(vec![from]);
        }

        // Bump generation to lazily invalidate all nodes.
        self.astar_generation = self.astar_generation.wrapping_add(1);
        let cur_gen = self.astar_generation;

        // Initialise the start node.
        {
            let node = &mut self.astar_nodes[from];
            node.g = 0.0;
            node.f = pather.estimate(from, to);
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: from,
            f: self.astar_nodes[from].f,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.astar_nodes[ci].generation != cur_gen || !self.astar_nodes[ci].open {
                continue;
            }

            if ci == to {
                break 'search true;
            }

            self.astar_nodes[ci].open = false;
            let current_g = self.astar_nodes[ci].g;

            nbuf.clear();
            pather.neighbors(ci, &mut nbuf);

            for &ni in nbuf.iter() {
                if !self.contains(ni) {
                    continue;
                }
                let tentative_g = current_g + pather.cost(ci, ni);

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative_g;
                n.f = tentative_g + pather.estimate(ni, to);
                n.parent = ci;
                n.open = true;

                open.push(NodeRef { idx: ni, f: n.f });
            }
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }

        // Reconstruct path.
        let mut path = Vec::new();
        let mut ci = to;
        while ci != NO_PARENT {
            path.push(ci);
            ci = self.astar_nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }
}
