//! Toll estimation.
//!
//! The aggregate toll and plaza count depend only on route distance.  The
//! per-segment breakdown charges each hop by its own road length, taken from
//! `Route::leg_km`, so segments add up to the aggregate.

use lx_core::{require_positive, CityId, InvalidRequest, TollRates, VehicleProfile};
use lx_network::Route;

use crate::CostResult;

/// Toll attributed to one hop of a route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TollSegment {
    pub from:        CityId,
    pub to:          CityId,
    pub distance_km: f64,
    pub toll:        f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TollEstimate {
    pub distance_km: f64,
    pub total_toll:  f64,
    /// Estimated number of toll plazas crossed.
    pub plaza_count: u32,
    /// Empty when only a distance was supplied.
    pub segments:    Vec<TollSegment>,
}

#[derive(Debug, Clone, Default)]
pub struct TollEstimator {
    pub rates: TollRates,
}

impl TollEstimator {
    pub fn new(rates: TollRates) -> Self {
        Self { rates }
    }

    /// Aggregate toll for a bare distance, without segments.
    pub fn estimate_distance(&self, distance_km: f64, vehicle: &VehicleProfile) -> CostResult<TollEstimate> {
        let distance_km = require_positive("distance", distance_km)?;
        Ok(TollEstimate {
            distance_km,
            total_toll:  toll_for(distance_km, vehicle),
            plaza_count: self.plaza_count(distance_km),
            segments:    Vec::new(),
        })
    }

    /// Aggregate toll for `route` plus one segment per hop.
    pub fn estimate(&self, route: &Route, vehicle: &VehicleProfile) -> CostResult<TollEstimate> {
        if route.hops() == 0 || route.cities.len() != route.hops() + 1 {
            return Err(InvalidRequest::new(
                "route",
                format!("{} cities / {} legs", route.cities.len(), route.hops()),
                "route must have one leg per consecutive city pair",
            )
            .into());
        }
        let mut estimate = self.estimate_distance(route.distance_km, vehicle)?;
        estimate.segments = route
            .legs()
            .map(|(from, to, km)| TollSegment {
                from,
                to,
                distance_km: km,
                toll: toll_for(km, vehicle),
            })
            .collect();
        Ok(estimate)
    }

    /// `ceil(km / 100 × density)`.
    pub fn plaza_count(&self, distance_km: f64) -> u32 {
        (distance_km / 100.0 * self.rates.plaza_density_per_100km).ceil() as u32
    }
}

#[inline]
fn toll_for(distance_km: f64, vehicle: &VehicleProfile) -> f64 {
    distance_km * vehicle.toll_rate_per_100km / 100.0
}
