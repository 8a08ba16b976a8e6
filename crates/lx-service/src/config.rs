//! Static configuration loading.
//!
//! # Engine config (JSON)
//!
//! Every field is optional; omitted fields keep their defaults.
//!
//! ```json
//! {
//!   "avg_speed_kmh": 55,
//!   "eta": { "monsoon_pct": 25, "utc_offset_secs": 0 }
//! }
//! ```
//!
//! # Vehicle profiles (CSV)
//!
//! ```csv
//! vehicle_type,toll_rate_per_100km,avg_speed_kmh,mileage_kmpl
//! heavy-truck,290,48,4.5
//! ```
//!
//! Rows replace the standard profile of their class; classes without a row
//! keep the standard profile.

use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use lx_core::{EngineConfig, VehicleClass, VehicleProfile, VehicleProfiles};

use crate::{ServiceError, ServiceResult};

/// Load and validate an [`EngineConfig`] from a JSON file.
pub fn load_engine_config(path: &Path) -> ServiceResult<EngineConfig> {
    let file = std::fs::File::open(path)?;
    let config = engine_config_from_reader(file)?;
    info!("loaded engine config from {}", path.display());
    Ok(config)
}

/// Like [`load_engine_config`] but accepts any `Read` source.
pub fn engine_config_from_reader<R: Read>(reader: R) -> ServiceResult<EngineConfig> {
    let config: EngineConfig = serde_json::from_reader(reader)?;
    config
        .validate()
        .map_err(|e| ServiceError::Config(format!("engine config: {e}")))?;
    Ok(config)
}

// ── Vehicle profiles ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VehicleRecord {
    vehicle_type:        String,
    toll_rate_per_100km: f64,
    avg_speed_kmh:       f64,
    mileage_kmpl:        f64,
}

/// Load a vehicle profile table from CSV, starting from the standard table.
pub fn load_vehicle_profiles(path: &Path) -> ServiceResult<VehicleProfiles> {
    let file = std::fs::File::open(path)?;
    let profiles = vehicle_profiles_from_reader(file)?;
    info!("loaded vehicle profiles from {}", path.display());
    Ok(profiles)
}

/// Like [`load_vehicle_profiles`] but accepts any `Read` source.
pub fn vehicle_profiles_from_reader<R: Read>(reader: R) -> ServiceResult<VehicleProfiles> {
    let mut profiles = VehicleProfiles::standard();
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    for (row, result) in reader.deserialize::<VehicleRecord>().enumerate() {
        let row = row + 1;
        let rec = result.map_err(|e| ServiceError::Config(format!("vehicles row {row}: {e}")))?;
        let class: VehicleClass = rec
            .vehicle_type
            .parse()
            .map_err(|e| ServiceError::Config(format!("vehicles row {row}: {e}")))?;
        profiles = profiles
            .with_profile(VehicleProfile {
                class,
                toll_rate_per_100km: rec.toll_rate_per_100km,
                avg_speed_kmh:       rec.avg_speed_kmh,
                mileage_kmpl:        rec.mileage_kmpl,
            })
            .map_err(|e| ServiceError::Config(format!("vehicles row {row}: {e}")))?;
    }
    Ok(profiles)
}
