//! Operational cost model.
//!
//! ```text
//! fuel        = km / mileage × fuel_price
//! toll        = km × toll_rate_per_100km / 100
//! driver      = km / avg_speed × driver_rate_per_hour
//! maintenance = km × maintenance_per_km × (1 + tonnes × load_factor)
//! total       = fuel + toll + driver + maintenance
//! ```

use log::debug;

use lx_core::{require_positive, CostRates, VehicleProfile};

use crate::CostResult;

/// Per-component trip cost.  All fields are non-negative and
/// `total == fuel_cost + toll_cost + driver_cost + maintenance_cost`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    pub fuel_cost:        f64,
    pub toll_cost:        f64,
    pub driver_cost:      f64,
    pub maintenance_cost: f64,
    pub total:            f64,
    pub cost_per_km:      f64,
}

impl CostBreakdown {
    fn from_components(distance_km: f64, fuel: f64, toll: f64, driver: f64, maintenance: f64) -> Self {
        let total = fuel + toll + driver + maintenance;
        Self {
            fuel_cost:        fuel,
            toll_cost:        toll,
            driver_cost:      driver,
            maintenance_cost: maintenance,
            total,
            cost_per_km:      total / distance_km,
        }
    }
}

/// Derives a [`CostBreakdown`] from distance and vehicle parameters.
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    pub rates: CostRates,
}

impl CostModel {
    pub fn new(rates: CostRates) -> Self {
        Self { rates }
    }

    /// Cost of hauling `cargo_kg` over `distance_km` at `fuel_price` per litre.
    ///
    /// `distance_km`, `cargo_kg` and `fuel_price` must be positive and finite.
    pub fn estimate(
        &self,
        distance_km: f64,
        vehicle:     &VehicleProfile,
        cargo_kg:    f64,
        fuel_price:  f64,
    ) -> CostResult<CostBreakdown> {
        let distance_km = require_positive("distance", distance_km)?;
        let cargo_kg    = require_positive("cargo_weight", cargo_kg)?;
        let fuel_price  = require_positive("fuel_price", fuel_price)?;
        vehicle.validate()?;

        let fuel   = distance_km / vehicle.mileage_kmpl * fuel_price;
        let toll   = distance_km * vehicle.toll_rate_per_100km / 100.0;
        let driver = distance_km / vehicle.avg_speed_kmh * self.rates.driver_rate_per_hour;
        let load_factor = 1.0 + cargo_kg / 1_000.0 * self.rates.maintenance_load_factor_per_tonne;
        let maintenance = distance_km * self.rates.maintenance_per_km * load_factor;

        let breakdown = CostBreakdown::from_components(distance_km, fuel, toll, driver, maintenance);
        debug!(
            "cost {:.1} km {}: total {:.2} ({:.2}/km)",
            distance_km, vehicle.class, breakdown.total, breakdown.cost_per_km
        );
        Ok(breakdown)
    }
}
