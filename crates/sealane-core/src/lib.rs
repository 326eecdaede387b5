//! Geographic primitives for sea-lane routing.
//!
//! This crate provides the foundational types used across the *sealane*
//! workspace: WGS84 positions, inclusive bounding boxes, and the geodesic
//! distance helpers (haversine, rhumb line, point-to-line) that the route
//! pipeline measures everything with. All distances are in kilometres.

pub mod distance;
pub mod error;
pub mod geom;

pub use distance::{
    haversine_km, line_length_km, point_to_line_km, rhumb_km, round_km, validate_line,
};
pub use error::{GeoError, ParseLonLatError};
pub use geom::{BoundingBox, LonLat};
