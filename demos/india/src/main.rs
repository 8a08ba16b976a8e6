//! india: the rust_lx route engine over a 15-city Indian trunk network.
//!
//! Runs every service operation once and prints each response as JSON.
//!
//! ```text
//! india [ENGINE_CONFIG.json [VEHICLES.csv]]
//! ```
//!
//! Set `RUST_LOG=debug` to see routing and estimation detail.

mod network;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use lx_core::{EngineConfig, GeoPoint, VehicleProfiles};
use lx_service::{LogisticsService, TollQuery, load_engine_config, load_vehicle_profiles};

use network::build_network;

// ── Sample request ────────────────────────────────────────────────────────────

const SOURCE:       &str = "Mumbai";
const DESTINATION:  &str = "Kolkata";
const VEHICLE:      &str = "heavy-truck";
const CARGO_KG:     f64  = 12_000.0;
const FUEL_PRICE:   f64  = 94.0;          // per litre
const SEASON:       &str = "monsoon";
const STOPS:        [&str; 4] = ["Bhopal", "Hyderabad", "Surat", "Jaipur"];

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<()> {
    println!("── {label} ──");
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    // ── Configuration ─────────────────────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_engine_config(Path::new(&path))
            .with_context(|| format!("loading engine config {path}"))?,
        None => EngineConfig::default(),
    };
    let vehicles = match args.next() {
        Some(path) => load_vehicle_profiles(Path::new(&path))
            .with_context(|| format!("loading vehicle profiles {path}"))?,
        None => VehicleProfiles::standard(),
    };

    let graph = build_network().context("building the city network")?;
    let service = LogisticsService::builder(graph)
        .config(config)
        .vehicles(vehicles)
        .build()?;

    // ── Operations ────────────────────────────────────────────────────────
    print_json("cities", &service.list_cities())?;

    let route = service.shortest_route(SOURCE, DESTINATION)?;
    print_json("shortest route", &route)?;

    print_json(
        "cost",
        &service.estimate_cost(route.distance, VEHICLE, CARGO_KG, FUEL_PRICE)?,
    )?;
    print_json(
        "toll",
        &service.estimate_toll(&TollQuery::Path(route.path.clone()), VEHICLE)?,
    )?;

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;
    print_json(
        "eta",
        &service.estimate_eta(&route.path, route.distance, VEHICLE, CARGO_KG, now, Some(SEASON))?,
    )?;

    print_json("sequence", &service.sequence_stops(SOURCE, &STOPS)?)?;

    let snapped = service.nearest_city(GeoPoint::new(20.0, 76.0))?;
    info!("(20.0, 76.0) snaps to {snapped}");

    println!("── export ──");
    service.export_route(&route, now, std::io::stdout().lock())?;
    println!();

    info!("{} routes cached", service.cached_routes());
    Ok(())
}
