//! Connected-component labelling.

use crate::SearchCache;
use crate::traits::{NodeId, Pather};

impl SearchCache {
    /// Label every node with a connected-component ID and return the number
    /// of components.
    ///
    /// Two nodes belong to the same component if there is a path of
    /// neighbours (as defined by `pather`) between them. Labels are assigned
    /// in ascending node order, so node 0 is always in component 0. After
    /// this call use [`cc_at`](Self::cc_at) to read them back.
    pub fn cc_map_all<P: Pather>(&mut self, pather: &P) -> usize {
        if self.is_empty() {
            return 0;
        }
        let len = self.len;
        for v in self.cc_labels[..len].iter_mut() {
            *v = -1;
        }

        let mut label: i32 = 0;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        for start in 0..len {
            if self.cc_labels[start] >= 0 {
                continue;
            }

            // Iterative DFS from `start`.
            self.cc_stack.clear();
            self.cc_stack.push(start);
            self.cc_labels[start] = label;

            while let Some(ci) = self.cc_stack.pop() {
                nbuf.clear();
                pather.neighbors(ci, &mut nbuf);

                for &ni in nbuf.iter() {
                    if self.contains(ni) && self.cc_labels[ni] < 0 {
                        self.cc_labels[ni] = label;
                        self.cc_stack.push(ni);
                    }
                }
            }

            label += 1;
        }

        self.nbuf = nbuf;
        label as usize
    }

    /// Query the connected-component label of a node.
    ///
    /// Returns `None` if the node is out of range or carries no label yet.
    pub fn cc_at(&self, n: NodeId) -> Option<usize> {
        if !self.contains(n) {
            return None;
        }
        let label = self.cc_labels[n];
        if label < 0 { None } else { Some(label as usize) }
    }
}
