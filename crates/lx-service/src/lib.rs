//! `lx-service`: the request boundary of the `rust_lx` route engine.
//!
//! [`LogisticsService`] bundles an immutable [`lx_network::CityGraph`], the
//! vehicle profile table, and the engine configuration, and exposes one
//! method per logical operation.  Requests name cities and vehicle classes
//! by string; responses are plain `serde::Serialize` data.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`service`] | `LogisticsService`, `ServiceBuilder`, `TollQuery`          |
//! | [`report`]  | Response types: `CityListing`, `RouteReport`, `TollReport`, … |
//! | [`export`]  | `RouteExport`: JSON itinerary with per-segment timing      |
//! | [`config`]  | JSON `EngineConfig` and CSV vehicle-profile loading        |
//! | [`error`]   | `ServiceError`, `ErrorKind`, `ServiceResult<T>`            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Enables `lx-sequence/parallel` for `sequence_stops`.    |

pub mod config;
pub mod error;
pub mod export;
pub mod report;
pub mod service;


pub use config::{
    engine_config_from_reader, load_engine_config, load_vehicle_profiles,
    vehicle_profiles_from_reader,
};
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use export::{ExportSegment, RouteExport};
pub use report::{
    CityListing, EtaReport, RouteReport, SegmentReport, SequenceReport, TollReport,
    TollSegmentReport,
};
pub use service::{LogisticsService, ServiceBuilder, TollQuery};
