//! `lx-core`: foundational types for the `rust_lx` logistics route engine.
//!
//! This crate is a dependency of every other `lx-*` crate.  It has no `lx-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `CityId`, `ArcId`                                        |
//! | [`geo`]       | `GeoPoint`, haversine distance                           |
//! | [`vehicle`]   | `VehicleClass`, `VehicleProfile`, `VehicleProfiles`      |
//! | [`config`]    | `EngineConfig`, `CostRates`, `TollRates`, `EtaRules`     |
//! | [`error`]     | `InvalidRequest`, `require_positive`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `lx-service` for JSON config and responses.    |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CostRates, EngineConfig, EtaRules, PeakWindow, TollRates};
pub use error::{InvalidRequest, require_positive};
pub use geo::GeoPoint;
pub use ids::{ArcId, CityId};
pub use vehicle::{VehicleClass, VehicleProfile, VehicleProfiles};
