//! Subcommand handlers for the `sealane` binary.
//!
//! Each handler writes its JSON report to the given writer and returns the
//! process exit code: [`EXIT_OK`] on success, [`EXIT_NO_ROUTE`] when the
//! query has no answer. Failures to load the network surface as errors.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Args, ValueEnum};
use serde::Serialize;

use sealane_route::{
    BoundingBox, DEFAULT_PRECISION, LonLat, MaritimeNetwork, NetworkSource, NetworkStats,
    RoutePoint, RouterConfig, SeaRouter, path_distance_km,
};

pub const EXIT_OK: u8 = 0;
pub const EXIT_NO_ROUTE: u8 = 2;

/// Which lane network to load.
#[derive(Args, Debug, Clone)]
pub struct NetworkArgs {
    /// GeoJSON FeatureCollection of lanes to use instead of the bundled network.
    #[arg(long, global = true, value_name = "PATH")]
    pub network: Option<PathBuf>,

    /// Vertex-merge precision in degrees.
    #[arg(long, global = true, value_name = "DEG", default_value_t = DEFAULT_PRECISION)]
    pub precision: f64,
}

impl NetworkArgs {
    pub fn source(&self) -> NetworkSource {
        match &self.network {
            Some(path) => NetworkSource::File(path.clone()),
            None => NetworkSource::Bundled,
        }
    }

    pub fn router(&self) -> SeaRouter {
        let config = RouterConfig {
            precision: self.precision,
            ..RouterConfig::default()
        };
        SeaRouter::new(self.source(), config)
    }
}

/// Output encoding of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `{distance, geometry, waypoints}` object.
    Json,
    /// GeoJSON `Feature` with a `LineString` geometry.
    #[value(name = "geojson")]
    GeoJson,
}

/// Arguments for `sealane route`.
#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Origin as LON,LAT.
    #[arg(long, value_name = "LON,LAT", allow_hyphen_values = true)]
    pub from: LonLat,

    /// Destination as LON,LAT.
    #[arg(long, value_name = "LON,LAT", allow_hyphen_values = true)]
    pub to: LonLat,

    /// Label echoed back as the route's origin.
    #[arg(long)]
    pub from_name: Option<String>,

    /// Label echoed back as the route's destination.
    #[arg(long)]
    pub to_name: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
}

/// Arguments for `sealane snap`.
#[derive(Args, Debug)]
pub struct SnapArgs {
    /// Position to snap, as LON,LAT.
    #[arg(long, value_name = "LON,LAT", allow_hyphen_values = true)]
    pub at: LonLat,
}

#[derive(Serialize)]
struct SnapReport<'a> {
    query: LonLat,
    snapped: LonLat,
    vertex: usize,
    lane: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    lane_name: Option<&'a str>,
    component: Option<usize>,
    offset_km: f64,
}

#[derive(Serialize)]
struct NetworkReport {
    source: String,
    precision: f64,
    #[serde(flatten)]
    stats: NetworkStats,
    bounds: Option<BoundingBox>,
}

pub fn run_route(router: &SeaRouter, args: &RouteArgs, out: &mut impl Write) -> Result<u8> {
    load(router)?;
    let from = route_point(args.from, args.from_name.as_deref());
    let to = route_point(args.to, args.to_name.as_deref());
    let Some(route) = router.find_route(&from, &to) else {
        return Ok(EXIT_NO_ROUTE);
    };
    match args.format {
        Format::Json => emit(out, &route)?,
        Format::GeoJson => emit(out, &route.to_feature())?,
    }
    Ok(EXIT_OK)
}

pub fn run_snap(router: &SeaRouter, args: &SnapArgs, out: &mut impl Write) -> Result<u8> {
    let network = load(router)?;
    let Some(s) = network.snap(args.at) else {
        tracing::warn!("{} cannot be snapped onto the network", args.at);
        return Ok(EXIT_NO_ROUTE);
    };
    let report = SnapReport {
        query: args.at,
        snapped: s.coord,
        vertex: s.vertex,
        lane: s.lane,
        lane_name: network
            .lanes()
            .get(s.lane)
            .and_then(|lane| lane.name.as_deref()),
        component: network.component(s.vertex),
        offset_km: path_distance_km(&[args.at, s.coord]),
    };
    emit(out, &report)?;
    Ok(EXIT_OK)
}

pub fn run_chokepoints(router: &SeaRouter, out: &mut impl Write) -> Result<u8> {
    emit(out, router.detector().table())?;
    Ok(EXIT_OK)
}

pub fn run_info(router: &SeaRouter, args: &NetworkArgs, out: &mut impl Write) -> Result<u8> {
    let network = load(router)?;
    let report = NetworkReport {
        source: match &args.network {
            Some(path) => path.display().to_string(),
            None => "bundled".to_string(),
        },
        precision: args.precision,
        stats: network.stats(),
        bounds: network.bounds(),
    };
    emit(out, &report)?;
    Ok(EXIT_OK)
}

fn load(router: &SeaRouter) -> Result<&Arc<MaritimeNetwork>> {
    router
        .try_network()
        .map_err(|e| anyhow!("cannot load lane network: {e}"))
}

fn route_point(p: LonLat, name: Option<&str>) -> RoutePoint {
    match name {
        Some(name) => RoutePoint::named(p.lon, p.lat, name),
        None => RoutePoint::from(p),
    }
}

fn emit<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to encode output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "Gibraltar run"},
             "geometry": {"type": "LineString",
                          "coordinates": [[-9.5, 37.0], [-6.5, 36.0], [-5.0, 36.0], [-1.0, 36.5]]}},
            {"type": "Feature", "properties": {"name": "lake"},
             "geometry": {"type": "LineString", "coordinates": [[50.0, 40.0], [51.0, 42.0]]}}
        ]
    }"#;

    fn router() -> SeaRouter {
        SeaRouter::new(
            NetworkSource::GeoJson(LANES.to_string()),
            RouterConfig::default(),
        )
    }

    fn route_args(from: [f64; 2], to: [f64; 2], format: Format) -> RouteArgs {
        RouteArgs {
            from: from.into(),
            to: to.into(),
            from_name: Some("Lisbon".to_string()),
            to_name: None,
            format,
        }
    }

    fn output(buf: Vec<u8>) -> serde_json::Value {
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn route_json() {
        let mut buf = Vec::new();
        let args = route_args([-9.4, 37.0], [-1.0, 36.4], Format::Json);
        assert_eq!(run_route(&router(), &args, &mut buf).unwrap(), EXIT_OK);
        let v = output(buf);
        assert_eq!(v["waypoints"], serde_json::json!(["Strait of Gibraltar"]));
        assert_eq!(v["origin"], "Lisbon");
        assert_eq!(v["geometry"].as_array().unwrap().len(), 4);
        assert!(v["distance"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn route_geojson() {
        let mut buf = Vec::new();
        let args = route_args([-9.4, 37.0], [-1.0, 36.4], Format::GeoJson);
        assert_eq!(run_route(&router(), &args, &mut buf).unwrap(), EXIT_OK);
        let v = output(buf);
        assert_eq!(v["type"], "Feature");
        assert_eq!(v["geometry"]["type"], "LineString");
        assert_eq!(v["properties"]["origin"], "Lisbon");
    }

    #[test]
    fn no_route_exit_code() {
        let mut buf = Vec::new();
        let args = route_args([-9.4, 37.0], [50.0, 40.1], Format::Json);
        assert_eq!(run_route(&router(), &args, &mut buf).unwrap(), EXIT_NO_ROUTE);
        assert!(buf.is_empty());
    }

    #[test]
    fn bad_network_is_an_error() {
        let router = SeaRouter::new(
            NetworkSource::GeoJson("[]".to_string()),
            RouterConfig::default(),
        );
        let args = route_args([0.0, 0.0], [1.0, 1.0], Format::Json);
        assert!(run_route(&router, &args, &mut Vec::new()).is_err());
        let network = NetworkArgs {
            network: None,
            precision: DEFAULT_PRECISION,
        };
        assert!(run_info(&router, &network, &mut Vec::new()).is_err());
    }

    #[test]
    fn snap_report() {
        let mut buf = Vec::new();
        let args = SnapArgs {
            at: LonLat::new(-6.4, 36.2),
        };
        assert_eq!(run_snap(&router(), &args, &mut buf).unwrap(), EXIT_OK);
        let v = output(buf);
        assert_eq!(v["snapped"], serde_json::json!([-6.5, 36.0]));
        assert_eq!(v["lane"], 0);
        assert_eq!(v["lane_name"], "Gibraltar run");
        assert_eq!(v["component"], 0);
        assert!(v["offset_km"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn chokepoint_table() {
        let mut buf = Vec::new();
        run_chokepoints(&router(), &mut buf).unwrap();
        let v = output(buf);
        let table = v.as_array().unwrap();
        assert_eq!(table.len(), 9);
        assert_eq!(table[0]["name"], "Suez Canal");
        assert_eq!(table[0]["bounds"], serde_json::json!([32.0, 29.5, 34.0, 31.5]));
    }

    #[test]
    fn info_report() {
        let mut buf = Vec::new();
        let args = NetworkArgs {
            network: None,
            precision: DEFAULT_PRECISION,
        };
        run_info(&router(), &args, &mut buf).unwrap();
        let v = output(buf);
        assert_eq!(v["source"], "bundled");
        assert_eq!(v["lanes"], 2);
        assert_eq!(v["vertices"], 6);
        assert_eq!(v["edges"], 4);
        assert_eq!(v["components"], 2);
        assert_eq!(v["bounds"], serde_json::json!([-9.5, 36.0, 51.0, 42.0]));
    }

    #[test]
    fn network_path_selects_file_source() {
        let args = NetworkArgs {
            network: Some(PathBuf::from("lanes.geojson")),
            precision: DEFAULT_PRECISION,
        };
        assert_eq!(
            args.source(),
            NetworkSource::File(PathBuf::from("lanes.geojson"))
        );
    }
}
