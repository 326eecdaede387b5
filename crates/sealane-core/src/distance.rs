use std::f64::consts::{FRAC_PI_4, PI, TAU};

use geo::{Closest, ClosestPoint, HaversineDistance, HaversineLength, Line, LineString};

use crate::error::GeoError;
use crate::geom::LonLat;

const METERS_PER_KM: f64 = 1000.0;

/// Mean earth radius, the sphere the haversine measures are taken on.
const EARTH_RADIUS_KM: f64 = 6371.0088;

// Below this the stretched-latitude difference is treated as zero and the
// line runs east-west.
const RHUMB_FLAT_EPS: f64 = 1e-12;

/// Great-circle (haversine) distance in kilometres.
#[inline]
pub fn haversine_km(a: LonLat, b: LonLat) -> f64 {
    a.to_point().haversine_distance(&b.to_point()) / METERS_PER_KM
}

/// Rhumb-line (constant bearing) distance in kilometres.
///
/// Symmetric in its arguments. The shorter way round in longitude is taken.
pub fn rhumb_km(a: LonLat, b: LonLat) -> f64 {
    let (phi1, phi2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_phi = phi2 - phi1;
    let d_psi = ((FRAC_PI_4 + phi2 / 2.0).tan() / (FRAC_PI_4 + phi1 / 2.0).tan()).ln();
    let q = if d_psi.abs() > RHUMB_FLAT_EPS {
        d_phi / d_psi
    } else {
        phi1.cos()
    };

    let mut d_lambda = (b.lon - a.lon).to_radians();
    if d_lambda.abs() > PI {
        d_lambda -= TAU.copysign(d_lambda);
    }
    (d_phi * d_phi + q * q * d_lambda * d_lambda).sqrt() * EARTH_RADIUS_KM
}

/// Check that `line` can be measured: two or more vertices, all finite.
pub fn validate_line(line: &[LonLat]) -> Result<(), GeoError> {
    if line.len() < 2 {
        return Err(GeoError::DegenerateLine(line.len()));
    }
    match line.iter().find(|p| !p.is_finite()) {
        Some(&p) => Err(GeoError::NonFinite(p)),
        None => Ok(()),
    }
}

/// Shortest distance in kilometres from `p` to the polyline `line`.
///
/// Each segment is projected onto in the plane of raw degrees; the distance
/// to the projected point is then measured along the great circle.
pub fn point_to_line_km(p: LonLat, line: &[LonLat]) -> Result<f64, GeoError> {
    if !p.is_finite() {
        return Err(GeoError::NonFinite(p));
    }
    validate_line(line)?;

    let target = p.to_point();
    let mut best = f64::INFINITY;
    for w in line.windows(2) {
        let seg = Line::new(geo::Coord::from(w[0]), geo::Coord::from(w[1]));
        let nearest = match seg.closest_point(&target) {
            Closest::Intersection(q) | Closest::SinglePoint(q) => q,
            // Zero-length segment.
            Closest::Indeterminate => seg.start_point(),
        };
        let d = target.haversine_distance(&nearest) / METERS_PER_KM;
        if d < best {
            best = d;
        }
    }
    Ok(best)
}

/// Cumulative great-circle length of a polyline in kilometres.
///
/// Fewer than two vertices measure 0.
pub fn line_length_km(line: &[LonLat]) -> f64 {
    let ls: LineString<f64> = line.iter().map(|&p| geo::Coord::from(p)).collect();
    ls.haversine_length() / METERS_PER_KM
}

/// Round a distance to two decimals (hundredths of a kilometre).
#[inline]
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
