//! Shortest paths between snapped points.

use sealane_core::{LonLat, line_length_km, round_km};
use sealane_paths::SearchCache;

use crate::network::MaritimeNetwork;
use crate::snap::SnappedPoint;

impl MaritimeNetwork {
    /// Shortest path between two snapped points as an ordered list of
    /// vertex positions, endpoints included.
    ///
    /// Returns `None` when the endpoints lie in different components or are
    /// not vertices of this network. `cache` is resized to fit if it was
    /// built for another network.
    pub fn find_path(
        &self,
        cache: &mut SearchCache,
        from: &SnappedPoint,
        to: &SnappedPoint,
    ) -> Option<Vec<LonLat>> {
        let (ca, cb) = (self.component(from.vertex)?, self.component(to.vertex)?);
        if ca != cb {
            log::debug!(
                "{} and {} lie in different components ({ca} vs {cb})",
                from.coord,
                to.coord
            );
            return None;
        }
        if cache.len() != self.vertex_count() {
            cache.resize(self.vertex_count());
        }
        let ids = cache.astar_path(self, from.vertex, to.vertex)?;
        ids.into_iter().map(|id| self.vertex(id)).collect()
    }
}

/// Length of a path in kilometres, rounded to two decimals.
pub fn path_distance_km(path: &[LonLat]) -> f64 {
    round_km(line_length_km(path))
}
