//! The route pipeline: snap, solve, annotate.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use sealane_paths::SearchCache;
use serde::{Deserialize, Serialize};

use crate::chokepoint::{Chokepoint, WaypointDetector, default_chokepoints};
use crate::dataset::BUNDLED_NETWORK;
use crate::error::NetworkError;
use crate::network::{DEFAULT_PRECISION, MaritimeNetwork};
use crate::query::{RoutePoint, RouteResult};
use crate::snap::SnappedPoint;
use crate::solver::path_distance_km;

/// Where the lane network comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkSource {
    /// The lanes compiled into the crate.
    Bundled,
    /// A GeoJSON `FeatureCollection` held in memory.
    GeoJson(String),
    /// A GeoJSON file read on first use.
    File(PathBuf),
}

impl NetworkSource {
    /// Read and build the network.
    pub fn load(&self, precision: f64) -> Result<MaritimeNetwork, NetworkError> {
        match self {
            Self::Bundled => MaritimeNetwork::from_geojson(BUNDLED_NETWORK, precision),
            Self::GeoJson(src) => MaritimeNetwork::from_geojson(src, precision),
            Self::File(path) => {
                let src = fs::read_to_string(path).map_err(|source| NetworkError::Io {
                    path: path.clone(),
                    source,
                })?;
                MaritimeNetwork::from_geojson(&src, precision)
            }
        }
    }
}

/// Router settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Vertex-merge precision in degrees.
    pub precision: f64,
    /// Chokepoints reported on routes, in output order.
    pub chokepoints: Vec<Chokepoint>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            chokepoints: default_chokepoints(),
        }
    }
}

/// Computes sea routes over a lazily loaded lane network.
///
/// The network is built on first use and kept for the router's lifetime.
/// A router is `Send + Sync`; share one behind an `Arc` rather than
/// building several. If the network fails to load, the error is logged
/// once and every later query answers `None`.
pub struct SeaRouter {
    source: NetworkSource,
    precision: f64,
    detector: WaypointDetector,
    network: OnceCell<Result<Arc<MaritimeNetwork>, NetworkError>>,
}

impl SeaRouter {
    pub fn new(source: NetworkSource, config: RouterConfig) -> Self {
        Self {
            source,
            precision: config.precision,
            detector: WaypointDetector::new(config.chokepoints),
            network: OnceCell::new(),
        }
    }

    /// Router over the bundled lanes with the default configuration.
    pub fn bundled() -> Self {
        Self::new(NetworkSource::Bundled, RouterConfig::default())
    }

    /// The network, loading it on first call.
    pub fn try_network(&self) -> Result<&Arc<MaritimeNetwork>, &NetworkError> {
        self.network
            .get_or_init(|| match self.source.load(self.precision) {
                Ok(network) => {
                    let stats = network.stats();
                    log::info!(
                        "maritime network loaded: {} lanes, {} vertices, {} edges, {} components",
                        stats.lanes,
                        stats.vertices,
                        stats.edges,
                        stats.components
                    );
                    if stats.skipped_features > 0 {
                        log::warn!("{} non-line features ignored", stats.skipped_features);
                    }
                    Ok(Arc::new(network))
                }
                Err(e) => {
                    log::error!("maritime network failed to load: {e}");
                    Err(e)
                }
            })
            .as_ref()
    }

    /// The network, or `None` if it failed to load.
    pub fn network(&self) -> Option<&Arc<MaritimeNetwork>> {
        self.try_network().ok()
    }

    pub fn detector(&self) -> &WaypointDetector {
        &self.detector
    }

    /// Snap a query point onto the network.
    pub fn snap(&self, point: &RoutePoint) -> Option<SnappedPoint> {
        self.network()?.snap(point.position())
    }

    /// Compute the route between two points.
    ///
    /// Returns `None` if the network is unavailable, either point cannot be
    /// snapped, or no path joins the snapped points.
    pub fn find_route(&self, from: &RoutePoint, to: &RoutePoint) -> Option<RouteResult> {
        let network = self.network()?;
        let mut cache = SearchCache::new(network.vertex_count());
        self.route_with_cache(&mut cache, from, to)
    }

    /// Like [`find_route`](Self::find_route), reusing the caller's search
    /// scratch memory.
    pub fn route_with_cache(
        &self,
        cache: &mut SearchCache,
        from: &RoutePoint,
        to: &RoutePoint,
    ) -> Option<RouteResult> {
        let network = self.network()?;
        let (Some(start), Some(end)) = (network.snap(from.position()), network.snap(to.position()))
        else {
            log::warn!("no sea route from {from} to {to}: point off the network");
            return None;
        };

        let Some(mut geometry) = network.find_path(cache, &start, &end) else {
            log::warn!(
                "no sea route from {from} to {to} (snapped {} -> {})",
                start.coord,
                end.coord
            );
            return None;
        };
        if geometry.len() == 1 {
            // Keep the geometry a valid line.
            geometry.push(geometry[0]);
        }

        let distance = path_distance_km(&geometry);
        let waypoints = self
            .detector
            .detect(&geometry)
            .into_iter()
            .map(str::to_owned)
            .collect();
        log::debug!(
            "route {from} -> {to}: {distance} km over {} positions",
            geometry.len()
        );

        Some(RouteResult {
            distance,
            geometry,
            waypoints,
            origin: from.name.clone(),
            destination: to.name.clone(),
        })
    }
}
