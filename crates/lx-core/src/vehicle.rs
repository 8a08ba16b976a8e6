//! Vehicle classes and their static parameter bundles.
//!
//! A [`VehicleProfiles`] table is built once at start-up (standard defaults,
//! optionally overridden from configuration) and only read afterwards.

use std::fmt;
use std::str::FromStr;

use crate::InvalidRequest;

// ── VehicleClass ──────────────────────────────────────────────────────────────

/// Toll/tariff class of a delivery vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VehicleClass {
    /// Car, jeep, or van.
    Car,
    /// Light commercial vehicle (pickup, mini-truck).
    LightCommercial,
    /// Two-axle truck or bus.
    HeavyTruck,
    /// Three or more axles.
    MultiAxle,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 4] = [
        VehicleClass::Car,
        VehicleClass::LightCommercial,
        VehicleClass::HeavyTruck,
        VehicleClass::MultiAxle,
    ];

    /// Position in [`VehicleClass::ALL`]; used to index profile tables.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            VehicleClass::Car             => 0,
            VehicleClass::LightCommercial => 1,
            VehicleClass::HeavyTruck      => 2,
            VehicleClass::MultiAxle       => 3,
        }
    }

    /// Canonical label, accepted back by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Car             => "car",
            VehicleClass::LightCommercial => "light-commercial",
            VehicleClass::HeavyTruck      => "heavy-truck",
            VehicleClass::MultiAxle       => "multi-axle",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleClass {
    type Err = InvalidRequest;

    /// Case-insensitive; `-`, `_` and spaces are interchangeable.  Common
    /// trade abbreviations (`lcv`, `truck`, `hgv`, `mav`) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c.to_ascii_lowercase() })
            .collect();
        match key.as_str() {
            "car" | "jeep" | "van"                    => Ok(VehicleClass::Car),
            "light-commercial" | "lcv" | "mini-truck" => Ok(VehicleClass::LightCommercial),
            "heavy-truck" | "truck" | "bus" | "hgv"   => Ok(VehicleClass::HeavyTruck),
            "multi-axle" | "multiaxle" | "mav"        => Ok(VehicleClass::MultiAxle),
            _ => Err(InvalidRequest::new("vehicle_type", s, "unknown vehicle class")),
        }
    }
}

// ── VehicleProfile ────────────────────────────────────────────────────────────

/// Static parameters for one vehicle class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleProfile {
    pub class: VehicleClass,
    /// Toll charged per 100 km of tolled highway.
    pub toll_rate_per_100km: f64,
    /// Assumed average line-haul speed, km/h.
    pub avg_speed_kmh: f64,
    /// Fuel mileage, km per litre.
    pub mileage_kmpl: f64,
}

impl VehicleProfile {
    /// Default parameters for `class`.
    ///
    /// | Class            | Toll / 100 km | Speed km/h | km/l |
    /// |------------------|---------------|------------|------|
    /// | car              | 135           | 65         | 14   |
    /// | light-commercial | 215           | 55         | 9    |
    /// | heavy-truck      | 270           | 50         | 5    |
    /// | multi-axle       | 430           | 45         | 3.5  |
    pub fn standard(class: VehicleClass) -> Self {
        let (toll_rate_per_100km, avg_speed_kmh, mileage_kmpl) = match class {
            VehicleClass::Car             => (135.0, 65.0, 14.0),
            VehicleClass::LightCommercial => (215.0, 55.0, 9.0),
            VehicleClass::HeavyTruck      => (270.0, 50.0, 5.0),
            VehicleClass::MultiAxle       => (430.0, 45.0, 3.5),
        };
        Self { class, toll_rate_per_100km, avg_speed_kmh, mileage_kmpl }
    }

    /// Reject profiles that would make cost or ETA formulas degenerate.
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if !(self.toll_rate_per_100km.is_finite() && self.toll_rate_per_100km >= 0.0) {
            return Err(InvalidRequest::new(
                "toll_rate_per_100km",
                self.toll_rate_per_100km,
                "must be a non-negative finite number",
            ));
        }
        crate::require_positive("avg_speed_kmh", self.avg_speed_kmh)?;
        crate::require_positive("mileage_kmpl", self.mileage_kmpl)?;
        Ok(())
    }
}

// ── VehicleProfiles ───────────────────────────────────────────────────────────

/// Lookup table holding exactly one profile per [`VehicleClass`].
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleProfiles {
    profiles: [VehicleProfile; 4],
}

impl VehicleProfiles {
    /// Table populated with [`VehicleProfile::standard`] for every class.
    pub fn standard() -> Self {
        Self { profiles: VehicleClass::ALL.map(VehicleProfile::standard) }
    }

    /// Replace the entry for `profile.class`, validating it first.
    pub fn with_profile(mut self, profile: VehicleProfile) -> Result<Self, InvalidRequest> {
        profile.validate()?;
        let slot = profile.class.index();
        self.profiles[slot] = profile;
        Ok(self)
    }

    #[inline]
    pub fn get(&self, class: VehicleClass) -> &VehicleProfile {
        &self.profiles[class.index()]
    }

    /// Parse `vehicle_type` and return its profile.
    pub fn lookup(&self, vehicle_type: &str) -> Result<&VehicleProfile, InvalidRequest> {
        vehicle_type.parse::<VehicleClass>().map(|class| self.get(class))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleProfile> {
        self.profiles.iter()
    }
}

impl Default for VehicleProfiles {
    fn default() -> Self {
        Self::standard()
    }
}
