//! Named maritime chokepoints and route annotation.

use sealane_core::{BoundingBox, LonLat};
use serde::{Deserialize, Serialize};

/// Built-in chokepoint table, `[min_lon, min_lat, max_lon, max_lat]`.
const DEFAULT_TABLE: [(&str, [f64; 4]); 9] = [
    ("Suez Canal", [32.0, 29.5, 34.0, 31.5]),
    ("Panama Canal", [-80.0, 8.5, -79.0, 9.5]),
    ("Strait of Gibraltar", [-6.0, 35.5, -5.0, 36.5]),
    ("Strait of Malacca", [98.0, 1.0, 104.0, 6.0]),
    ("Strait of Hormuz", [55.5, 25.5, 57.5, 27.0]),
    ("Bab el-Mandeb", [42.5, 12.0, 44.0, 13.5]),
    ("English Channel", [-5.0, 49.0, 2.0, 51.5]),
    ("Cape of Good Hope", [17.0, -35.5, 20.0, -33.5]),
    ("Singapore Strait", [103.5, 1.0, 104.5, 1.5]),
];

/// A named canal, strait or cape with the box that marks passage through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chokepoint {
    pub name: String,
    pub bounds: BoundingBox,
}

impl Chokepoint {
    pub fn new(name: impl Into<String>, bounds: impl Into<BoundingBox>) -> Self {
        Self {
            name: name.into(),
            bounds: bounds.into(),
        }
    }
}

/// The nine built-in chokepoints in table order.
pub fn default_chokepoints() -> Vec<Chokepoint> {
    DEFAULT_TABLE
        .iter()
        .map(|&(name, bounds)| Chokepoint::new(name, bounds))
        .collect()
}

/// Reports which chokepoints a route passes through.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointDetector {
    table: Vec<Chokepoint>,
}

impl Default for WaypointDetector {
    fn default() -> Self {
        Self::new(default_chokepoints())
    }
}

impl WaypointDetector {
    pub fn new(table: Vec<Chokepoint>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &[Chokepoint] {
        &self.table
    }

    /// Names of the chokepoints with at least one of `coords` inside their
    /// box.
    ///
    /// The result follows table order, not traversal order, and holds each
    /// name once.
    pub fn detect(&self, coords: &[LonLat]) -> Vec<&str> {
        let mut found: Vec<&str> = Vec::new();
        for cp in &self.table {
            let name = cp.name.as_str();
            if !found.contains(&name) && coords.iter().any(|&c| cp.bounds.contains(c)) {
                found.push(name);
            }
        }
        found
    }
}
