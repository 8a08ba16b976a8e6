//! Delivery-time estimation with transparent risk modifiers.
//!
//! # Model
//!
//! ```text
//! base     = km / vehicle.avg_speed_kmh
//! driving  = base × (1 + Σ pct / 100)          cargo, vehicle class, season
//! rests    = (ceil(driving / max_block) − 1) × rest_break_hours
//! estimate = driving + peak_departure_penalty + rests
//! ```
//!
//! Every modifier that changes the estimate is reported as a [`RiskFactor`]
//! so callers can see where each added hour came from.  Modifiers that add
//! nothing (a 0 % class penalty, a dry-season trip) are not listed.

use std::fmt;
use std::str::FromStr;

use log::debug;

use lx_core::{require_positive, EtaRules, InvalidRequest, VehicleProfile};
use lx_network::Route;

use crate::CostResult;

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;

// ── Season ────────────────────────────────────────────────────────────────────

/// Caller-declared travel season.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Season {
    Dry,
    Monsoon,
    Winter,
}

impl Season {
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Dry     => "dry",
            Season::Monsoon => "monsoon",
            Season::Winter  => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = InvalidRequest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dry" | "summer"   => Ok(Season::Dry),
            "monsoon" | "rainy" => Ok(Season::Monsoon),
            "winter"           => Ok(Season::Winter),
            _ => Err(InvalidRequest::new("season", s, "expected dry, monsoon or winter")),
        }
    }
}

// ── Request / result types ────────────────────────────────────────────────────

/// When and under what conditions a trip starts.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Departure {
    /// Seconds since the Unix epoch, UTC.
    pub unix_secs: i64,
    pub season:    Option<Season>,
}

impl Departure {
    pub fn at(unix_secs: i64) -> Self {
        Self { unix_secs, season: None }
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RiskKind {
    HeavyCargo,
    VehicleClass,
    Season,
    PeakDeparture,
    DriverRest,
}

/// One applied modifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskFactor {
    pub kind:        RiskKind,
    /// Human-readable reason, e.g. `"monsoon season (+20%)"`.
    pub detail:      String,
    pub added_hours: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EtaEstimate {
    pub base_hours:          f64,
    /// `base_hours` plus every `added_hours` in `risk_factors`.
    pub estimated_hours:     f64,
    pub departure_unix_secs: i64,
    pub arrival_unix_secs:   i64,
    pub risk_factors:        Vec<RiskFactor>,
}

// ── EtaEstimator ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct EtaEstimator {
    pub rules: EtaRules,
}

impl EtaEstimator {
    pub fn new(rules: EtaRules) -> Self {
        Self { rules }
    }

    /// Estimate for a computed route.
    pub fn estimate_route(
        &self,
        route:     &Route,
        vehicle:   &VehicleProfile,
        cargo_kg:  f64,
        departure: &Departure,
    ) -> CostResult<EtaEstimate> {
        self.estimate(route.distance_km, vehicle, cargo_kg, departure)
    }

    /// Estimate for a bare distance.
    ///
    /// Fails when `distance_km` or `cargo_kg` is not positive and finite.
    pub fn estimate(
        &self,
        distance_km: f64,
        vehicle:     &VehicleProfile,
        cargo_kg:    f64,
        departure:   &Departure,
    ) -> CostResult<EtaEstimate> {
        let distance_km = require_positive("distance", distance_km)?;
        let cargo_kg    = require_positive("cargo_weight", cargo_kg)?;
        vehicle.validate()?;

        let rules = &self.rules;
        let base_hours = distance_km / vehicle.avg_speed_kmh;
        let mut risk_factors = Vec::new();

        // Percentage slowdowns, all relative to the base.
        let mut pct_factor = |kind: RiskKind, pct: f64, detail: String| {
            if pct > 0.0 {
                risk_factors.push(RiskFactor {
                    kind,
                    detail: format!("{detail} (+{pct}%)"),
                    added_hours: base_hours * pct / 100.0,
                });
            }
        };

        if cargo_kg > rules.heavy_cargo_threshold_kg {
            pct_factor(
                RiskKind::HeavyCargo,
                rules.heavy_cargo_pct,
                format!("cargo {cargo_kg} kg above {} kg", rules.heavy_cargo_threshold_kg),
            );
        }
        pct_factor(
            RiskKind::VehicleClass,
            rules.vehicle_pct(vehicle.class),
            format!("{} vehicle class", vehicle.class),
        );
        match departure.season {
            Some(Season::Monsoon) => {
                pct_factor(RiskKind::Season, rules.monsoon_pct, "monsoon season".to_string())
            }
            Some(Season::Winter) => {
                pct_factor(RiskKind::Season, rules.winter_pct, "winter fog".to_string())
            }
            Some(Season::Dry) | None => {}
        }

        let hour = self.local_hour(departure.unix_secs);
        if rules.peak_departure_hours > 0.0 && rules.peak_windows.iter().any(|w| w.contains(hour)) {
            risk_factors.push(RiskFactor {
                kind:        RiskKind::PeakDeparture,
                detail:      format!("departure at {hour:02}:00 local falls in peak traffic"),
                added_hours: rules.peak_departure_hours,
            });
        }

        let driving_hours = base_hours
            + risk_factors
                .iter()
                .filter(|f| f.kind != RiskKind::PeakDeparture)
                .map(|f| f.added_hours)
                .sum::<f64>();
        let breaks = rest_breaks(driving_hours, rules.max_continuous_drive_hours);
        if breaks > 0 && rules.rest_break_hours > 0.0 {
            risk_factors.push(RiskFactor {
                kind:        RiskKind::DriverRest,
                detail:      format!(
                    "{breaks} rest break(s) of {} h for {driving_hours:.1} h of driving",
                    rules.rest_break_hours
                ),
                added_hours: f64::from(breaks) * rules.rest_break_hours,
            });
        }

        let estimated_hours = base_hours + risk_factors.iter().map(|f| f.added_hours).sum::<f64>();
        let arrival_unix_secs = arrival_after(departure.unix_secs, estimated_hours, distance_km)?;

        debug!(
            "eta {:.1} km {}: base {:.2} h, estimate {:.2} h, {} risk factor(s)",
            distance_km,
            vehicle.class,
            base_hours,
            estimated_hours,
            risk_factors.len()
        );

        Ok(EtaEstimate {
            base_hours,
            estimated_hours,
            departure_unix_secs: departure.unix_secs,
            arrival_unix_secs,
            risk_factors,
        })
    }

    /// Hour of day (0–23) of `unix_secs` in the configured local time zone.
    ///
    /// Total over all of `i64`: the offset is applied modulo one day.
    pub fn local_hour(&self, unix_secs: i64) -> u8 {
        let secs_of_day = (unix_secs.rem_euclid(SECS_PER_DAY)
            + self.rules.utc_offset_secs.rem_euclid(SECS_PER_DAY))
            % SECS_PER_DAY;
        (secs_of_day / SECS_PER_HOUR) as u8
    }
}

/// `departure + hours`, rejecting trips whose arrival is not a representable
/// Unix time.
fn arrival_after(departure: i64, hours: f64, distance_km: f64) -> CostResult<i64> {
    let secs = (hours * SECS_PER_HOUR as f64).round();
    // 2^63 is the first f64 past i64::MAX.
    if !secs.is_finite() || secs >= i64::MAX as f64 {
        return Err(InvalidRequest::new("distance", distance_km, "trip duration is out of range").into());
    }
    departure
        .checked_add(secs as i64)
        .ok_or_else(|| InvalidRequest::new("departure_time", departure, "arrival time is out of range").into())
}

/// Breaks between consecutive blocks; none after the final block.
fn rest_breaks(driving_hours: f64, max_block_hours: f64) -> u32 {
    let blocks = (driving_hours / max_block_hours).ceil() as u32;
    blocks.saturating_sub(1)
}
