//! The lane network compiled into the crate.
//!
//! A coarse global set of commercial shipping lanes as a GeoJSON
//! `FeatureCollection` of named `LineString` features. Lanes meet at shared
//! vertices. The Caspian Sea lanes form a separate component with no
//! connection to the open ocean.

/// GeoJSON source of the bundled lane network.
pub const BUNDLED_NETWORK: &str = include_str!("../data/marnet.geojson");
