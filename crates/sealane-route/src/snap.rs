//! Snapping arbitrary positions onto the lane network.

use sealane_core::{LonLat, point_to_line_km, rhumb_km};
use sealane_paths::NodeId;

use crate::network::{MaritimeNetwork, lane_label};

/// A query position moved onto a network vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappedPoint {
    /// Position of the vertex.
    pub coord: LonLat,
    pub vertex: NodeId,
    /// Index of the lane the vertex was picked from.
    pub lane: usize,
}

impl MaritimeNetwork {
    /// Snap `p` to the closest vertex of the closest lane.
    ///
    /// The lane is the one with the smallest point-to-line distance; within
    /// it, the vertex with the smallest rhumb-line distance wins. Ties keep
    /// the first candidate in load order. Lanes that cannot be measured are
    /// skipped. Returns `None` for an empty network or a non-finite `p`.
    pub fn snap(&self, p: LonLat) -> Option<SnappedPoint> {
        if !p.is_finite() {
            log::debug!("cannot snap non-finite position {p}");
            return None;
        }
        let (lane, _) = self.nearest_lane(p)?;
        self.nearest_vertex(p, lane)
    }

    /// Index and distance in kilometres of the lane closest to `p`.
    pub fn nearest_lane(&self, p: LonLat) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, lane) in self.lanes().iter().enumerate() {
            let km = match point_to_line_km(p, &lane.coords) {
                Ok(km) => km,
                Err(e) => {
                    log::debug!("lane {} skipped while snapping: {e}", lane_label(lane, i));
                    continue;
                }
            };
            match best {
                Some((_, best_km)) if km >= best_km => {}
                _ => best = Some((i, km)),
            }
        }
        best
    }

    fn nearest_vertex(&self, p: LonLat, lane: usize) -> Option<SnappedPoint> {
        let coords = &self.lanes().get(lane)?.coords;
        let mut best: Option<(usize, f64)> = None;
        for (pos, &c) in coords.iter().enumerate() {
            let km = rhumb_km(p, c);
            match best {
                Some((_, best_km)) if km >= best_km => {}
                _ => best = Some((pos, km)),
            }
        }
        let (pos, _) = best?;
        let vertex = self.lane_vertex(lane, pos)?;
        Some(SnappedPoint {
            coord: self.vertex(vertex)?,
            vertex,
            lane,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{DEFAULT_PRECISION, Lane};

    fn ll(lon: f64, lat: f64) -> LonLat {
        LonLat::new(lon, lat)
    }

    fn net(lanes: Vec<Lane>) -> MaritimeNetwork {
        MaritimeNetwork::from_lanes(lanes, DEFAULT_PRECISION).unwrap()
    }

    #[test]
    fn snaps_to_nearest_vertex_of_nearest_lane() {
        let n = net(vec![
            Lane::new(vec![ll(0.0, 0.0), ll(10.0, 0.0)]),
            Lane::new(vec![ll(0.0, 5.0), ll(4.0, 5.0), ll(10.0, 5.0)]),
        ]);
        // Closer to the northern lane; its (4, 5) vertex is nearest.
        let s = n.snap(ll(3.0, 4.0)).unwrap();
        assert_eq!(s.lane, 1);
        assert_eq!(s.coord, ll(4.0, 5.0));
        assert_eq!(n.vertex(s.vertex), Some(ll(4.0, 5.0)));
    }

    #[test]
    fn nearest_lane_beats_nearest_vertex() {
        // The query is 1° from the long lane's interior but its vertices
        // are far away; the short lane has a vertex 2° away.
        let n = net(vec![
            Lane::new(vec![ll(-3.0, 2.0), ll(3.5, 2.0)]),
            Lane::new(vec![ll(0.0, -1.0), ll(0.0, -2.0)]),
        ]);
        let s = n.snap(ll(0.0, 1.0)).unwrap();
        assert_eq!(s.lane, 0);
        assert_eq!(s.coord, ll(-3.0, 2.0));
    }

    #[test]
    fn vertex_choice_uses_true_rhumb_distance_southward() {
        // Both vertices lie south of the query; (0, 35) is closer along a
        // constant bearing even though it is further south.
        let n = net(vec![Lane::new(vec![ll(0.0, 35.0), ll(40.0, 40.0)])]);
        let s = n.snap(ll(0.0, 70.0)).unwrap();
        assert_eq!(s.coord, ll(0.0, 35.0));
    }

    #[test]
    fn ties_keep_first_lane_and_vertex() {
        let n = net(vec![
            Lane::new(vec![ll(-1.0, 1.0), ll(1.0, 1.0)]),
            Lane::new(vec![ll(-1.0, -1.0), ll(1.0, -1.0)]),
        ]);
        let s = n.snap(ll(0.0, 0.0)).unwrap();
        assert_eq!(s.lane, 0);
        assert_eq!(s.coord, ll(-1.0, 1.0));
    }

    #[test]
    fn snapping_is_idempotent() {
        let n = net(vec![
            Lane::new(vec![ll(0.0, 0.0), ll(2.0, 1.0), ll(4.0, 0.0)]),
            Lane::new(vec![ll(4.0, 0.0), ll(6.0, -1.0)]),
        ]);
        let p = ll(3.1, 0.4);
        assert_eq!(n.snap(p), n.snap(p));
    }

    #[test]
    fn malformed_lanes_are_skipped() {
        let n = net(vec![
            Lane::new(vec![ll(0.0, 0.1)]),
            Lane::new(vec![ll(0.0, 0.0), ll(f64::INFINITY, 0.0)]),
            Lane::new(vec![ll(0.0, 3.0), ll(1.0, 3.0)]),
        ]);
        let s = n.snap(ll(0.0, 0.0)).unwrap();
        assert_eq!(s.lane, 2);
        assert_eq!(s.coord, ll(0.0, 3.0));
    }

    #[test]
    fn nothing_to_snap_to() {
        assert_eq!(net(Vec::new()).snap(ll(0.0, 0.0)), None);
        let only_bad = net(vec![Lane::new(vec![ll(1.0, 1.0)])]);
        assert_eq!(only_bad.snap(ll(0.0, 0.0)), None);
        let n = net(vec![Lane::new(vec![ll(0.0, 0.0), ll(1.0, 0.0)])]);
        assert_eq!(n.snap(ll(f64::NAN, 0.0)), None);
    }
}
