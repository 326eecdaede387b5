//! Route request and response types.

use std::fmt;

use sealane_core::LonLat;
use serde::{Deserialize, Serialize};

/// One end of a route request.
///
/// `name` is a label carried through to the result; it never affects the
/// computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RoutePoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            name: None,
        }
    }

    pub fn named(longitude: f64, latitude: f64, name: impl Into<String>) -> Self {
        Self {
            longitude,
            latitude,
            name: Some(name.into()),
        }
    }

    #[inline]
    pub fn position(&self) -> LonLat {
        LonLat::new(self.longitude, self.latitude)
    }
}

impl From<LonLat> for RoutePoint {
    fn from(p: LonLat) -> Self {
        Self::new(p.lon, p.lat)
    }
}

impl fmt::Display for RoutePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} {}", self.position()),
            None => write!(f, "{}", self.position()),
        }
    }
}

/// A computed sea route.
///
/// Serialises as `{"distance", "geometry", "waypoints"}` with `geometry` as
/// a list of `[lon, lat]` positions; the optional labels are omitted when
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Kilometres, rounded to two decimals.
    pub distance: f64,
    pub geometry: Vec<LonLat>,
    /// Chokepoints passed, in chokepoint-table order.
    pub waypoints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl RouteResult {
    /// The route as a GeoJSON `LineString` feature.
    ///
    /// Properties: `distance_km`, `waypoints`, and `origin`/`destination`
    /// when labelled.
    pub fn to_feature(&self) -> geojson::Feature {
        let line = self.geometry.iter().map(|p| vec![p.lon, p.lat]).collect();
        let mut properties = serde_json::Map::new();
        properties.insert("distance_km".into(), serde_json::json!(self.distance));
        properties.insert("waypoints".into(), serde_json::json!(self.waypoints));
        if let Some(origin) = &self.origin {
            properties.insert("origin".into(), serde_json::json!(origin));
        }
        if let Some(destination) = &self.destination {
            properties.insert("destination".into(), serde_json::json!(destination));
        }
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::LineString(line))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
