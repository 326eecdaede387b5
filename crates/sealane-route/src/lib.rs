//! Maritime routing between arbitrary positions.
//!
//! A route is computed in three steps:
//!
//! 1. both endpoints are **snapped** onto the lane network: first to the
//!    nearest lane, then to that lane's nearest vertex;
//! 2. the **shortest path** between the snapped vertices is found with A*
//!    over great-circle edge lengths;
//! 3. the path is **annotated** with its length and the named chokepoints
//!    (canals, straits, capes) it passes through.
//!
//! [`SeaRouter`] ties the steps together and loads the network lazily on
//! first use, either from the lanes bundled with the crate or from a
//! GeoJSON `FeatureCollection` of line features.
//!
//! ```
//! use sealane_route::{RoutePoint, SeaRouter};
//!
//! let router = SeaRouter::bundled();
//! let route = router
//!     .find_route(
//!         &RoutePoint::named(4.3, 51.95, "Rotterdam"),
//!         &RoutePoint::named(122.0, 31.0, "Shanghai"),
//!     )
//!     .expect("both ports are on the open-ocean network");
//! assert!(route.waypoints.iter().any(|w| w == "Suez Canal"));
//! assert!(route.distance > 15_000.0);
//! ```
//!
//! Failures never surface as errors from route queries: an unloadable
//! network, an unsnappable point or a disconnected pair all yield `None`
//! and a log record.

mod chokepoint;
mod dataset;
mod error;
mod network;
mod query;
mod router;
mod snap;
mod solver;

pub use chokepoint::{Chokepoint, WaypointDetector, default_chokepoints};
pub use dataset::BUNDLED_NETWORK;
pub use error::NetworkError;
pub use network::{DEFAULT_PRECISION, Lane, MIN_PRECISION, MaritimeNetwork, NetworkStats};
pub use query::{RoutePoint, RouteResult};
pub use router::{NetworkSource, RouterConfig, SeaRouter};
pub use snap::SnappedPoint;
pub use solver::path_distance_km;

pub use sealane_core::{BoundingBox, LonLat};
pub use sealane_paths::SearchCache;
