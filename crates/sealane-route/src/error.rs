use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`MaritimeNetwork`](crate::MaritimeNetwork).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("failed to read network file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("expected a FeatureCollection, found a {0}")]
    NotFeatureCollection(&'static str),
    #[error("vertex precision must be finite and at least 1e-12 degrees, got {0}")]
    InvalidPrecision(f64),
}
