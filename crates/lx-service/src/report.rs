//! Response types.
//!
//! Cities are reported by name and coordinates as `(lat, lon)` pairs, which
//! serialize as two-element JSON arrays.

use std::collections::BTreeMap;

use serde::Serialize;

use lx_cost::RiskFactor;

/// Every city in the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityListing {
    /// Sorted by name.
    pub cities:      Vec<String>,
    pub coordinates: BTreeMap<String, (f64, f64)>,
}

/// One road of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentReport {
    pub from:        String,
    pub to:          String,
    pub distance_km: f64,
    pub time_hours:  f64,
}

/// A least-distance route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub path:        Vec<String>,
    /// Total km.
    pub distance:    f64,
    pub time_hours:  f64,
    /// Position of each city in `path`.
    pub coordinates: Vec<(f64, f64)>,
    pub segments:    Vec<SegmentReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TollSegmentReport {
    pub from:        String,
    pub to:          String,
    pub distance_km: f64,
    pub toll:        f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TollReport {
    pub vehicle_type: String,
    pub distance_km:  f64,
    pub total_toll:   f64,
    pub plaza_count:  u32,
    /// Empty for distance-only queries.
    pub segments:     Vec<TollSegmentReport>,
}

/// Greedy visiting order for a set of stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceReport {
    pub start:          String,
    /// Stops in visiting order, start excluded.
    pub order:          Vec<String>,
    pub total_distance: f64,
    /// Route driven to reach each stop in `order`.
    pub legs:           Vec<RouteReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtaReport {
    pub path:                Vec<String>,
    pub distance:            f64,
    pub vehicle_type:        String,
    pub base_hours:          f64,
    pub estimated_hours:     f64,
    pub departure_unix_secs: i64,
    pub arrival_unix_secs:   i64,
    pub risk_factors:        Vec<RiskFactor>,
}
