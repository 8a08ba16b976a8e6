//! CSV network loader.
//!
//! # CSV format
//!
//! Two files: one row per city, one row per undirected road.
//!
//! ```csv
//! name,lat,lon
//! Mumbai,19.0760,72.8777
//! Pune,18.5204,73.8567
//! ```
//!
//! ```csv
//! from,to,km
//! Mumbai,Pune,150
//! ```
//!
//! Roads must reference cities by their exact name.  All builder validation
//! applies (duplicate names or roads, self-loops, non-positive km), and the
//! first offending row aborts the load.

use std::io::Read;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use lx_core::GeoPoint;

use crate::network::{CityGraph, CityGraphBuilder};
use crate::{NetworkError, NetworkResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CityRecord {
    name: String,
    lat:  f64,
    lon:  f64,
}

#[derive(Deserialize)]
struct RoadRecord {
    from: String,
    to:   String,
    km:   f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`CityGraph`] from a cities CSV and a roads CSV.
pub fn load_graph_csv(cities: &Path, roads: &Path) -> NetworkResult<CityGraph> {
    let cities_file = std::fs::File::open(cities)?;
    let roads_file = std::fs::File::open(roads)?;
    load_graph_readers(cities_file, roads_file)
}

/// Like [`load_graph_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedding the network
/// with `include_str!`.
pub fn load_graph_readers<C: Read, R: Read>(cities: C, roads: R) -> NetworkResult<CityGraph> {
    let mut builder = CityGraphBuilder::new();

    // ── Cities ────────────────────────────────────────────────────────────
    let mut city_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(cities);
    for (row, result) in city_reader.deserialize::<CityRecord>().enumerate() {
        let rec = result.map_err(|e| NetworkError::Parse(format!("cities row {}: {e}", row + 1)))?;
        builder.add_city(rec.name, GeoPoint::new(rec.lat, rec.lon))?;
    }

    // ── Roads ─────────────────────────────────────────────────────────────
    let mut road_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(roads);
    for (row, result) in road_reader.deserialize::<RoadRecord>().enumerate() {
        let rec = result.map_err(|e| NetworkError::Parse(format!("roads row {}: {e}", row + 1)))?;
        builder.add_road_by_name(&rec.from, &rec.to, rec.km)?;
    }

    let graph = builder.build();
    info!("loaded network: {} cities, {} roads", graph.city_count(), graph.road_count());
    if !graph.is_connected() {
        warn!("network is not connected; some city pairs have no route");
    }
    Ok(graph)
}
