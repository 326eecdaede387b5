use thiserror::Error;

use crate::geom::LonLat;

/// Errors raised by geodesic computations on malformed input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// A line needs at least two vertices.
    #[error("line has {0} vertices, at least 2 are required")]
    DegenerateLine(usize),
    /// A coordinate component is NaN or infinite.
    #[error("non-finite coordinate {0}")]
    NonFinite(LonLat),
}

/// Errors from parsing a `"LON,LAT"` string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseLonLatError {
    #[error("expected \"LON,LAT\", got {0:?}")]
    Format(String),
    #[error("invalid number {0:?}")]
    Number(String),
    #[error("coordinate {0} is outside the WGS84 domain")]
    OutOfRange(LonLat),
}
