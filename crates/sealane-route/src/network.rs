//! The lane network: loading, vertex deduplication and graph adjacency.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use geojson::{GeoJson, Value};
use sealane_core::{BoundingBox, LonLat, haversine_km, validate_line};
use sealane_paths::{AstarPather, NodeId, Pather, SearchCache, WeightedPather};
use serde::Serialize;

use crate::error::NetworkError;

/// Default vertex-merge precision in degrees (about one metre).
pub const DEFAULT_PRECISION: f64 = 1e-5;

/// Finest accepted vertex-merge precision. Grid cell indices of any
/// position stay well inside `i64` at this size.
pub const MIN_PRECISION: f64 = 1e-12;

/// One navigable lane: a polyline of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub name: Option<String>,
    pub coords: Vec<LonLat>,
}

impl Lane {
    pub fn new(coords: Vec<LonLat>) -> Self {
        Self { name: None, coords }
    }
}

/// Summary counts of a loaded network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    /// Lanes kept for snapping, routable or not.
    pub lanes: usize,
    /// Lanes that contributed graph edges.
    pub routable_lanes: usize,
    pub vertices: usize,
    /// Undirected edges after deduplication.
    pub edges: usize,
    pub components: usize,
    /// Features dropped at load time (no geometry, or not a line).
    pub skipped_features: usize,
}

/// Immutable graph of sea lanes.
///
/// Built once, then shared read-only by every route computation. Vertices
/// are lane positions merged on a quantised grid, so lanes that share an
/// endpoint are joined. Edges connect consecutive positions of a lane and
/// weigh their great-circle length in kilometres.
#[derive(Debug)]
pub struct MaritimeNetwork {
    lanes: Vec<Lane>,
    // Vertex id of each lane position; empty for lanes that are not routable.
    lane_vertices: Vec<Vec<NodeId>>,
    vertices: Vec<LonLat>,
    adjacency: Vec<Vec<(NodeId, f64)>>,
    components: Vec<usize>,
    stats: NetworkStats,
}

impl MaritimeNetwork {
    /// Parse a GeoJSON `FeatureCollection` of line features.
    ///
    /// `LineString` features become one lane each and `MultiLineString`
    /// features one lane per part. Other features are skipped and counted
    /// in [`NetworkStats::skipped_features`].
    pub fn from_geojson(src: &str, precision: f64) -> Result<Self, NetworkError> {
        let collection = match src.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(fc) => fc,
            GeoJson::Feature(_) => return Err(NetworkError::NotFeatureCollection("Feature")),
            GeoJson::Geometry(_) => return Err(NetworkError::NotFeatureCollection("Geometry")),
        };

        let mut lanes = Vec::with_capacity(collection.features.len());
        let mut skipped = 0;
        for (i, feature) in collection.features.iter().enumerate() {
            let name = feature
                .properties
                .as_ref()
                .and_then(|props| props.get("name"))
                .and_then(|v| v.as_str())
                .map(str::to_owned);
            match feature.geometry.as_ref().map(|g| &g.value) {
                Some(Value::LineString(line)) => lanes.push(Lane {
                    name,
                    coords: line.iter().map(|p| position(p)).collect(),
                }),
                Some(Value::MultiLineString(parts)) => {
                    for part in parts {
                        lanes.push(Lane {
                            name: name.clone(),
                            coords: part.iter().map(|p| position(p)).collect(),
                        });
                    }
                }
                other => {
                    log::debug!(
                        "feature #{i} skipped: {}",
                        other.map_or("no geometry", geometry_kind)
                    );
                    skipped += 1;
                }
            }
        }

        let mut network = Self::from_lanes(lanes, precision)?;
        network.stats.skipped_features = skipped;
        Ok(network)
    }

    /// Build a network from lanes.
    ///
    /// `precision` must be finite and at least [`MIN_PRECISION`].
    ///
    /// Lanes with fewer than two positions or a non-finite coordinate are
    /// kept (the snapper skips them) but contribute no vertices or edges.
    pub fn from_lanes(lanes: Vec<Lane>, precision: f64) -> Result<Self, NetworkError> {
        if !(precision.is_finite() && precision >= MIN_PRECISION) {
            return Err(NetworkError::InvalidPrecision(precision));
        }

        let mut index: HashMap<(i64, i64), NodeId> = HashMap::new();
        let mut vertices: Vec<LonLat> = Vec::new();
        let mut adjacency: Vec<Vec<(NodeId, f64)>> = Vec::new();
        let mut lane_vertices = Vec::with_capacity(lanes.len());
        let mut edges = 0;
        let mut routable_lanes = 0;

        for (li, lane) in lanes.iter().enumerate() {
            if let Err(e) = validate_line(&lane.coords) {
                log::debug!("lane {} is not routable: {e}", lane_label(lane, li));
                lane_vertices.push(Vec::new());
                continue;
            }
            routable_lanes += 1;

            let mut ids = Vec::with_capacity(lane.coords.len());
            for &c in &lane.coords {
                let id = match index.entry(quantize(c, precision)) {
                    Entry::Occupied(e) => *e.get(),
                    Entry::Vacant(e) => {
                        vertices.push(c);
                        adjacency.push(Vec::new());
                        *e.insert(vertices.len() - 1)
                    }
                };
                ids.push(id);
            }

            for w in ids.windows(2) {
                let (a, b) = (w[0], w[1]);
                if a == b {
                    continue;
                }
                let km = haversine_km(vertices[a], vertices[b]);
                if link(&mut adjacency, a, b, km) {
                    edges += 1;
                }
            }
            lane_vertices.push(ids);
        }

        let mut network = Self {
            stats: NetworkStats {
                lanes: lanes.len(),
                routable_lanes,
                vertices: vertices.len(),
                edges,
                components: 0,
                skipped_features: 0,
            },
            lanes,
            lane_vertices,
            vertices,
            adjacency,
            components: Vec::new(),
        };

        let mut cache = SearchCache::new(network.vertices.len());
        network.stats.components = cache.cc_map_all(&network);
        network.components = (0..network.vertices.len())
            .filter_map(|id| cache.cc_at(id))
            .collect();
        Ok(network)
    }

    /// All lanes in load order.
    #[inline]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    #[inline]
    pub fn stats(&self) -> NetworkStats {
        self.stats
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Position of a vertex.
    #[inline]
    pub fn vertex(&self, id: NodeId) -> Option<LonLat> {
        self.vertices.get(id).copied()
    }

    /// Connected-component label of a vertex.
    #[inline]
    pub fn component(&self, id: NodeId) -> Option<usize> {
        self.components.get(id).copied()
    }

    /// Vertex id of position `pos` of lane `lane`, if the lane is routable.
    #[inline]
    pub(crate) fn lane_vertex(&self, lane: usize, pos: usize) -> Option<NodeId> {
        self.lane_vertices.get(lane)?.get(pos).copied()
    }

    /// Smallest box containing every vertex, or `None` for an empty network.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().copied())
    }
}

impl Pather for MaritimeNetwork {
    fn node_count(&self) -> usize {
        self.vertices.len()
    }

    fn neighbors(&self, n: NodeId, buf: &mut Vec<NodeId>) {
        if let Some(adj) = self.adjacency.get(n) {
            buf.extend(adj.iter().map(|&(m, _)| m));
        }
    }
}

impl WeightedPather for MaritimeNetwork {
    fn cost(&self, from: NodeId, to: NodeId) -> f64 {
        self.adjacency[from]
            .iter()
            .find(|&&(m, _)| m == to)
            .map_or(f64::INFINITY, |&(_, km)| km)
    }
}

impl AstarPather for MaritimeNetwork {
    // Edge weights are great-circle lengths, so the great-circle distance
    // to the goal never overestimates.
    fn estimate(&self, from: NodeId, to: NodeId) -> f64 {
        haversine_km(self.vertices[from], self.vertices[to])
    }
}

pub(crate) fn lane_label(lane: &Lane, index: usize) -> String {
    match &lane.name {
        Some(name) => format!("#{index} ({name})"),
        None => format!("#{index}"),
    }
}

fn position(p: &[f64]) -> LonLat {
    LonLat::new(
        p.first().copied().unwrap_or(f64::NAN),
        p.get(1).copied().unwrap_or(f64::NAN),
    )
}

fn geometry_kind(v: &Value) -> &'static str {
    #[allow(unreachable_patterns)]
    match v {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
        _ => "geometry",
    }
}

fn quantize(c: LonLat, precision: f64) -> (i64, i64) {
    (
        (c.lon / precision).round() as i64,
        (c.lat / precision).round() as i64,
    )
}

/// Add an undirected edge, keeping the lighter weight on duplicates.
/// Returns `true` if the edge is new.
fn link(adjacency: &mut [Vec<(NodeId, f64)>], a: NodeId, b: NodeId, km: f64) -> bool {
    if let Some(existing) = adjacency[a].iter_mut().find(|(m, _)| *m == b) {
        if km < existing.1 {
            existing.1 = km;
            if let Some(back) = adjacency[b].iter_mut().find(|(m, _)| *m == a) {
                back.1 = km;
            }
        }
        return false;
    }
    adjacency[a].push((b, km));
    adjacency[b].push((a, km));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ll(lon: f64, lat: f64) -> LonLat {
        LonLat::new(lon, lat)
    }

    #[test]
    fn shared_endpoints_are_merged() {
        let net = MaritimeNetwork::from_lanes(
            vec![
                Lane::new(vec![ll(0.0, 0.0), ll(1.0, 0.0)]),
                Lane::new(vec![ll(1.0, 0.0), ll(2.0, 0.0)]),
                // Within precision of (2, 0).
                Lane::new(vec![ll(2.000_001, 0.0), ll(2.0, 1.0)]),
            ],
            DEFAULT_PRECISION,
        )
        .unwrap();
        let stats = net.stats();
        assert_eq!(stats.lanes, 3);
        assert_eq!(stats.vertices, 4);
        assert_eq!(stats.edges, 3);
        assert_eq!(stats.components, 1);
    }

    #[test]
    fn duplicate_edges_keep_one_entry() {
        let net = MaritimeNetwork::from_lanes(
            vec![
                Lane::new(vec![ll(0.0, 0.0), ll(1.0, 0.0)]),
                Lane::new(vec![ll(1.0, 0.0), ll(0.0, 0.0)]),
            ],
            DEFAULT_PRECISION,
        )
        .unwrap();
        assert_eq!(net.stats().edges, 1);
        let mut buf = Vec::new();
        net.neighbors(0, &mut buf);
        assert_eq!(buf, vec![1]);
        let km = net.cost(0, 1);
        assert!((km - 111.195).abs() < 0.01, "got {km}");
        assert_eq!(net.cost(0, 1), net.cost(1, 0));
    }

    #[test]
    fn consecutive_duplicate_positions_add_no_self_loop() {
        let net = MaritimeNetwork::from_lanes(
            vec![Lane::new(vec![ll(0.0, 0.0), ll(0.0, 0.0), ll(1.0, 0.0)])],
            DEFAULT_PRECISION,
        )
        .unwrap();
        assert_eq!(net.stats().vertices, 2);
        assert_eq!(net.stats().edges, 1);
        assert_eq!(net.lane_vertex(0, 0), net.lane_vertex(0, 1));
    }

    #[test]
    fn malformed_lanes_are_kept_but_not_routable() {
        let net = MaritimeNetwork::from_lanes(
            vec![
                Lane::new(vec![ll(5.0, 5.0)]),
                Lane::new(vec![ll(0.0, 0.0), ll(f64::NAN, 0.0)]),
                Lane::new(vec![ll(0.0, 0.0), ll(1.0, 0.0)]),
            ],
            DEFAULT_PRECISION,
        )
        .unwrap();
        let stats = net.stats();
        assert_eq!(stats.lanes, 3);
        assert_eq!(stats.routable_lanes, 1);
        assert_eq!(stats.vertices, 2);
        assert_eq!(net.lane_vertex(0, 0), None);
        assert_eq!(net.lane_vertex(2, 1), Some(1));
    }

    #[test]
    fn components_are_labelled() {
        let net = MaritimeNetwork::from_lanes(
            vec![
                Lane::new(vec![ll(0.0, 0.0), ll(1.0, 0.0)]),
                Lane::new(vec![ll(50.0, 40.0), ll(51.0, 42.0)]),
            ],
            DEFAULT_PRECISION,
        )
        .unwrap();
        assert_eq!(net.stats().components, 2);
        assert_eq!(net.component(0), net.component(1));
        assert_ne!(net.component(0), net.component(2));
        assert_eq!(net.component(9), None);
    }

    #[test]
    fn invalid_precision_is_rejected() {
        for p in [0.0, -1e-5, f64::NAN, f64::INFINITY, 1e-18, MIN_PRECISION / 2.0] {
            assert!(matches!(
                MaritimeNetwork::from_lanes(Vec::new(), p),
                Err(NetworkError::InvalidPrecision(_))
            ));
        }
    }

    #[test]
    fn finest_precision_keeps_distant_vertices_apart() {
        let lanes = vec![Lane::new(vec![ll(100.0, 10.0), ll(120.0, 20.0)])];
        let net = MaritimeNetwork::from_lanes(lanes, MIN_PRECISION).unwrap();
        assert_eq!(net.stats().vertices, 2);
        assert_eq!(net.stats().edges, 1);
    }

    #[test]
    fn geojson_lines_and_multilines() {
        let src = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "a"},
                 "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 0]]}},
                {"type": "Feature", "properties": {"name": "b"},
                 "geometry": {"type": "MultiLineString",
                              "coordinates": [[[1, 0], [2, 0]], [[1, 0], [1, 1]]]}},
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Point", "coordinates": [3, 3]}},
                {"type": "Feature", "properties": null, "geometry": null}
            ]
        }"#;
        let net = MaritimeNetwork::from_geojson(src, DEFAULT_PRECISION).unwrap();
        let stats = net.stats();
        assert_eq!(stats.lanes, 3);
        assert_eq!(stats.skipped_features, 2);
        assert_eq!(stats.vertices, 4);
        assert_eq!(stats.edges, 3);
        assert_eq!(net.lanes()[0].name.as_deref(), Some("a"));
        assert_eq!(net.lanes()[2].name.as_deref(), Some("b"));
        assert_eq!(net.bounds(), Some(BoundingBox::new(0.0, 0.0, 2.0, 1.0)));
    }

    #[test]
    fn geojson_must_be_a_feature_collection() {
        let src = r#"{"type": "LineString", "coordinates": [[0, 0], [1, 0]]}"#;
        assert!(matches!(
            MaritimeNetwork::from_geojson(src, DEFAULT_PRECISION),
            Err(NetworkError::NotFeatureCollection("Geometry"))
        ));
        assert!(matches!(
            MaritimeNetwork::from_geojson("{ not json", DEFAULT_PRECISION),
            Err(NetworkError::GeoJson(_))
        ));
    }

    #[test]
    fn empty_network() {
        let net = MaritimeNetwork::from_lanes(Vec::new(), DEFAULT_PRECISION).unwrap();
        assert_eq!(net.stats(), NetworkStats::default());
        assert_eq!(net.bounds(), None);
    }
}
