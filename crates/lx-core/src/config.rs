//! Engine configuration: fixed rates and rule constants.
//!
//! # Design
//!
//! Every number the cost, toll, and ETA estimators use that is not a
//! per-request input lives here, grouped by consumer.  `EngineConfig` is
//! built once at start-up (typically `Default` overridden by a JSON file in
//! the application crate) and then shared read-only.
//!
//! With the `serde` feature every struct is `#[serde(default)]`, so a config
//! file only needs the fields it changes.

use crate::{require_positive, InvalidRequest, VehicleClass};

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Speed used to derive `Route::time_hours`, km/h.  Default: 60.
    pub avg_speed_kmh: f64,

    /// Flat per-km figure quoted on exported routes.  Default: 8.5.
    pub flat_cost_per_km: f64,

    pub cost: CostRates,
    pub toll: TollRates,
    pub eta:  EtaRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            avg_speed_kmh:    60.0,
            flat_cost_per_km: 8.5,
            cost:             CostRates::default(),
            toll:             TollRates::default(),
            eta:              EtaRules::default(),
        }
    }
}

impl EngineConfig {
    /// Check every rate once so estimators can assume sane constants.
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        require_positive("avg_speed_kmh", self.avg_speed_kmh)?;
        require_non_negative("flat_cost_per_km", self.flat_cost_per_km)?;
        self.cost.validate()?;
        self.toll.validate()?;
        self.eta.validate()
    }
}

// ── CostRates ─────────────────────────────────────────────────────────────────

/// Constants for the operational cost model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostRates {
    /// Driver wage per hour on the road.  Default: 250.
    pub driver_rate_per_hour: f64,
    /// Wear, tyres, and servicing per km.  Default: 2.5.
    pub maintenance_per_km: f64,
    /// Extra maintenance fraction per tonne of cargo.  Default: 0.02
    /// (a 10 t load adds 20 %).
    pub maintenance_load_factor_per_tonne: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            driver_rate_per_hour:              250.0,
            maintenance_per_km:                2.5,
            maintenance_load_factor_per_tonne: 0.02,
        }
    }
}

impl CostRates {
    fn validate(&self) -> Result<(), InvalidRequest> {
        require_non_negative("driver_rate_per_hour", self.driver_rate_per_hour)?;
        require_non_negative("maintenance_per_km", self.maintenance_per_km)?;
        require_non_negative(
            "maintenance_load_factor_per_tonne",
            self.maintenance_load_factor_per_tonne,
        )
    }
}

// ── TollRates ─────────────────────────────────────────────────────────────────

/// Constants for toll estimation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TollRates {
    /// Average toll plazas per 100 km of highway.  Default: 1.6
    /// (roughly one plaza every 60 km).
    pub plaza_density_per_100km: f64,
}

impl Default for TollRates {
    fn default() -> Self {
        Self { plaza_density_per_100km: 1.6 }
    }
}

impl TollRates {
    fn validate(&self) -> Result<(), InvalidRequest> {
        require_non_negative("plaza_density_per_100km", self.plaza_density_per_100km)
    }
}

// ── EtaRules ──────────────────────────────────────────────────────────────────

/// A half-open local-time window `[start_hour, end_hour)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakWindow {
    pub start_hour: u8,
    pub end_hour:   u8,
}

impl PeakWindow {
    #[inline]
    pub fn contains(self, hour: u8) -> bool {
        (self.start_hour..self.end_hour).contains(&hour)
    }
}

/// Deterministic ETA risk modifiers.
///
/// Percentages apply to the base driving time; fixed penalties are added as
/// hours.  All values are non-negative.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EtaRules {
    /// Cargo above this weight (kg) triggers `heavy_cargo_pct`.  Default: 10 000.
    pub heavy_cargo_threshold_kg: f64,
    /// Default: 10 %.
    pub heavy_cargo_pct: f64,

    /// Per-class slowdown, indexed like `VehicleClass::ALL`.
    /// Default: car 0 %, light-commercial 0 %, heavy-truck 5 %, multi-axle 10 %.
    pub vehicle_class_pct: [f64; 4],

    /// Default: 20 %.
    pub monsoon_pct: f64,
    /// Fog delays.  Default: 10 %.
    pub winter_pct: f64,

    /// Departures inside any window incur `peak_departure_hours`.
    /// Default: 08–11 and 17–21 local time.
    pub peak_windows: Vec<PeakWindow>,
    /// Default: 0.75 h.
    pub peak_departure_hours: f64,
    /// Offset applied to the Unix departure time before taking the hour.
    /// Default: +05:30 (19 800 s).
    pub utc_offset_secs: i64,

    /// A rest break is due after each full block of driving.  Default: 8 h.
    pub max_continuous_drive_hours: f64,
    /// Default: 0.5 h.
    pub rest_break_hours: f64,
}

impl Default for EtaRules {
    fn default() -> Self {
        Self {
            heavy_cargo_threshold_kg:   10_000.0,
            heavy_cargo_pct:            10.0,
            vehicle_class_pct:          [0.0, 0.0, 5.0, 10.0],
            monsoon_pct:                20.0,
            winter_pct:                 10.0,
            peak_windows: vec![
                PeakWindow { start_hour: 8,  end_hour: 11 },
                PeakWindow { start_hour: 17, end_hour: 21 },
            ],
            peak_departure_hours:       0.75,
            utc_offset_secs:            19_800,
            max_continuous_drive_hours: 8.0,
            rest_break_hours:           0.5,
        }
    }
}

impl EtaRules {
    #[inline]
    pub fn vehicle_pct(&self, class: VehicleClass) -> f64 {
        self.vehicle_class_pct[class.index()]
    }

    fn validate(&self) -> Result<(), InvalidRequest> {
        require_non_negative("heavy_cargo_threshold_kg", self.heavy_cargo_threshold_kg)?;
        require_non_negative("heavy_cargo_pct", self.heavy_cargo_pct)?;
        for pct in self.vehicle_class_pct {
            require_non_negative("vehicle_class_pct", pct)?;
        }
        require_non_negative("monsoon_pct", self.monsoon_pct)?;
        require_non_negative("winter_pct", self.winter_pct)?;
        for w in &self.peak_windows {
            if w.start_hour >= w.end_hour || w.end_hour > 24 {
                return Err(InvalidRequest::new(
                    "peak_windows",
                    format!("{}..{}", w.start_hour, w.end_hour),
                    "window must satisfy start < end <= 24",
                ));
            }
        }
        require_non_negative("peak_departure_hours", self.peak_departure_hours)?;
        require_positive("max_continuous_drive_hours", self.max_continuous_drive_hours)?;
        require_non_negative("rest_break_hours", self.rest_break_hours)?;
        Ok(())
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), InvalidRequest> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidRequest::new(field, value, "must be a non-negative finite number"))
    }
}
