//! Graph search over indexed node sets.
//!
//! This crate provides the search algorithms the sea-lane router runs on
//! its lane network:
//!
//! - **A\*** shortest-path search ([`SearchCache::astar_path`])
//! - **Connected Components** labelling ([`SearchCache::cc_map_all`])
//!
//! Graphs are described through the [`Pather`] trait family over dense
//! `usize` node ids. All algorithms operate through [`SearchCache`], which
//! owns and reuses internal buffers so that repeated queries incur zero
//! allocations after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | connected components |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod cache;
mod cc;
#[cfg(test)]
mod testgraph;
mod traits;

pub use cache::SearchCache;
pub use traits::{AstarPather, NodeId, Pather, WeightedPather};
