//! Geographic primitives: [`LonLat`] and [`BoundingBox`].
//!
//! Coordinates are WGS84 degrees in GeoJSON axis order (longitude first).

use std::fmt;
use std::str::FromStr;

use crate::error::ParseLonLatError;

// ---------------------------------------------------------------------------
// LonLat
// ---------------------------------------------------------------------------

/// A WGS84 position, longitude first.
///
/// With the `serde` feature it (de)serialises as a two-element array
/// `[lon, lat]`, the GeoJSON position layout.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    /// Create a new position.
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both components are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Whether the position lies within the valid WGS84 domain.
    #[inline]
    pub fn in_domain(self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }

    /// Convert to a `geo` point (x = lon, y = lat).
    #[inline]
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }
}

impl From<[f64; 2]> for LonLat {
    #[inline]
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self::new(lon, lat)
    }
}

impl From<LonLat> for [f64; 2] {
    #[inline]
    fn from(p: LonLat) -> Self {
        [p.lon, p.lat]
    }
}

impl From<LonLat> for geo::Coord<f64> {
    #[inline]
    fn from(p: LonLat) -> Self {
        geo::Coord { x: p.lon, y: p.lat }
    }
}

impl From<geo::Coord<f64>> for LonLat {
    #[inline]
    fn from(c: geo::Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// Parses `"LON,LAT"` (whitespace around either number is ignored).
impl FromStr for LonLat {
    type Err = ParseLonLatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lon, lat) = s
            .split_once(',')
            .ok_or_else(|| ParseLonLatError::Format(s.to_string()))?;
        let parse = |part: &str| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| ParseLonLatError::Number(part.to_string()))
        };
        let p = Self::new(parse(lon)?, parse(lat)?);
        if !p.is_finite() || !p.in_domain() {
            return Err(ParseLonLatError::OutOfRange(p));
        }
        Ok(p)
    }
}

// ---------------------------------------------------------------------------
// BoundingBox
// ---------------------------------------------------------------------------

/// A closed longitude/latitude rectangle `[min, max]`.
///
/// Unlike a half-open grid range, both edges are inclusive: a position lying
/// exactly on the boundary is inside. Boxes never wrap the antimeridian.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct BoundingBox {
    pub min: LonLat,
    pub max: LonLat,
}

impl BoundingBox {
    /// Create a new box from two corners and canonicalize so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> Self {
        Self {
            min: LonLat::new(lon0.min(lon1), lat0.min(lat1)),
            max: LonLat::new(lon0.max(lon1), lat0.max(lat1)),
        }
    }

    /// Smallest box containing every position, or `None` for an empty input.
    pub fn from_points<I: IntoIterator<Item = LonLat>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bb.extend(p);
        }
        Some(bb)
    }

    /// Whether `p` lies inside the box, boundary included.
    #[inline]
    pub fn contains(self, p: LonLat) -> bool {
        p.lon >= self.min.lon
            && p.lon <= self.max.lon
            && p.lat >= self.min.lat
            && p.lat <= self.max.lat
    }

    /// Grow the box so that it contains `p`.
    #[inline]
    pub fn extend(&mut self, p: LonLat) {
        self.min.lon = self.min.lon.min(p.lon);
        self.min.lat = self.min.lat.min(p.lat);
        self.max.lon = self.max.lon.max(p.lon);
        self.max.lat = self.max.lat.max(p.lat);
    }
}

impl From<[f64; 4]> for BoundingBox {
    #[inline]
    fn from([min_lon, min_lat, max_lon, max_lat]: [f64; 4]) -> Self {
        Self::new(min_lon, min_lat, max_lon, max_lat)
    }
}

impl From<BoundingBox> for [f64; 4] {
    #[inline]
    fn from(bb: BoundingBox) -> Self {
        [bb.min.lon, bb.min.lat, bb.max.lon, bb.max.lat]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.min.lon, self.min.lat, self.max.lon, self.max.lat
        )
    }
}
