//! The request-boundary facade.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use log::{debug, info};

use lx_core::{require_positive, CityId, EngineConfig, GeoPoint, InvalidRequest, VehicleProfiles};
use lx_cost::{CostBreakdown, CostModel, Departure, EtaEstimator, Season, TollEstimator};
use lx_network::{CachedRouter, CityGraph, DijkstraRouter, Route, Router};
use lx_sequence::Sequencer;

use crate::{
    CityListing, EtaReport, RouteExport, RouteReport, SegmentReport, SequenceReport, ServiceError,
    ServiceResult, TollReport, TollSegmentReport,
};

/// Relative slack allowed between a declared distance and its path length.
const DISTANCE_TOLERANCE: f64 = 1e-6;

/// What a toll request is priced on.
#[derive(Debug, Clone, PartialEq)]
pub enum TollQuery {
    /// A bare distance in km; no per-segment breakdown.
    Distance(f64),
    /// City names in travel order; consecutive cities must share a road.
    Path(Vec<String>),
}

// ── ServiceBuilder ────────────────────────────────────────────────────────────

/// Fluent builder for [`LogisticsService`].
///
/// | Method         | Default                        |
/// |----------------|--------------------------------|
/// | `.config(c)`   | `EngineConfig::default()`      |
/// | `.vehicles(v)` | `VehicleProfiles::standard()`  |
pub struct ServiceBuilder {
    graph:    Arc<CityGraph>,
    config:   Option<EngineConfig>,
    vehicles: Option<VehicleProfiles>,
}

impl ServiceBuilder {
    pub fn new(graph: impl Into<Arc<CityGraph>>) -> Self {
        Self { graph: graph.into(), config: None, vehicles: None }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn vehicles(mut self, vehicles: VehicleProfiles) -> Self {
        self.vehicles = Some(vehicles);
        self
    }

    /// Validate the configuration and assemble the service.
    pub fn build(self) -> ServiceResult<LogisticsService> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| ServiceError::Config(format!("engine config: {e}")))?;
        if self.graph.is_empty() {
            return Err(ServiceError::Config("city network is empty".into()));
        }
        let vehicles = self.vehicles.unwrap_or_default();

        info!(
            "logistics service ready: {} cities, {} roads, {} km/h",
            self.graph.city_count(),
            self.graph.road_count(),
            config.avg_speed_kmh
        );
        Ok(LogisticsService {
            router:   CachedRouter::new(DijkstraRouter::new(config.avg_speed_kmh)),
            cost:     CostModel::new(config.cost.clone()),
            toll:     TollEstimator::new(config.toll.clone()),
            eta:      EtaEstimator::new(config.eta.clone()),
            graph:    self.graph,
            vehicles,
            config,
        })
    }
}

// ── LogisticsService ──────────────────────────────────────────────────────────

/// One method per logical operation.
///
/// All methods take `&self`; the service is `Send + Sync` and can be shared
/// across request handlers behind an `Arc`.  The only interior state is the
/// route cache.
pub struct LogisticsService {
    graph:    Arc<CityGraph>,
    vehicles: VehicleProfiles,
    config:   EngineConfig,
    router:   CachedRouter<DijkstraRouter>,
    cost:     CostModel,
    toll:     TollEstimator,
    eta:      EtaEstimator,
}

impl LogisticsService {
    /// Service with default configuration and standard vehicle profiles.
    pub fn new(graph: impl Into<Arc<CityGraph>>) -> ServiceResult<Self> {
        ServiceBuilder::new(graph).build()
    }

    pub fn builder(graph: impl Into<Arc<CityGraph>>) -> ServiceBuilder {
        ServiceBuilder::new(graph)
    }

    pub fn graph(&self) -> &CityGraph {
        &self.graph
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn vehicles(&self) -> &VehicleProfiles {
        &self.vehicles
    }

    /// Number of routes currently cached.
    pub fn cached_routes(&self) -> usize {
        self.router.len()
    }

    // ── Operations ────────────────────────────────────────────────────────

    pub fn list_cities(&self) -> CityListing {
        let ids = self.graph.cities_sorted();
        let coordinates = ids
            .iter()
            .map(|&c| (self.graph.name(c).to_owned(), self.graph.position(c).as_tuple()))
            .collect::<BTreeMap<_, _>>();
        CityListing {
            cities: ids.iter().map(|&c| self.graph.name(c).to_owned()).collect(),
            coordinates,
        }
    }

    /// Least-distance route between two named cities.
    pub fn shortest_route(&self, source: &str, destination: &str) -> ServiceResult<RouteReport> {
        let route = self.router.route_by_name(&self.graph, source, destination)?;
        debug!(
            "route {} -> {}: {} hops, {:.1} km",
            source,
            destination,
            route.hops(),
            route.distance_km
        );
        Ok(self.route_report(&route))
    }

    pub fn estimate_cost(
        &self,
        distance:     f64,
        vehicle_type: &str,
        cargo_weight: f64,
        fuel_price:   f64,
    ) -> ServiceResult<CostBreakdown> {
        let vehicle = self.vehicles.lookup(vehicle_type)?;
        Ok(self.cost.estimate(distance, vehicle, cargo_weight, fuel_price)?)
    }

    pub fn estimate_toll(&self, query: &TollQuery, vehicle_type: &str) -> ServiceResult<TollReport> {
        let vehicle = self.vehicles.lookup(vehicle_type)?;
        let estimate = match query {
            TollQuery::Distance(km) => self.toll.estimate_distance(*km, vehicle)?,
            TollQuery::Path(names) => {
                let route = self.route_along(names)?;
                self.toll.estimate(&route, vehicle)?
            }
        };
        Ok(TollReport {
            vehicle_type: vehicle.class.to_string(),
            distance_km:  estimate.distance_km,
            total_toll:   estimate.total_toll,
            plaza_count:  estimate.plaza_count,
            segments: estimate
                .segments
                .iter()
                .map(|s| TollSegmentReport {
                    from:        self.graph.name(s.from).to_owned(),
                    to:          self.graph.name(s.to).to_owned(),
                    distance_km: s.distance_km,
                    toll:        s.toll,
                })
                .collect(),
        })
    }

    /// Greedy nearest-neighbour order for `stops`, starting at `start`.
    pub fn sequence_stops<S: AsRef<str>>(&self, start: &str, stops: &[S]) -> ServiceResult<SequenceReport> {
        let seq = Sequencer::new(&self.router).sequence_by_name(&self.graph, start, stops)?;
        Ok(SequenceReport {
            start:          self.graph.name(seq.start).to_owned(),
            order:          self.names(&seq.order),
            total_distance: seq.total_distance_km,
            legs:           seq.legs.iter().map(|leg| self.route_report(leg)).collect(),
        })
    }

    /// Delivery-time estimate.
    ///
    /// `path` may be empty.  When given, it must be a drivable path whose
    /// length matches `distance`.  `season` is parsed leniently
    /// (`"Monsoon"`, `"winter"`, …); `None` means no seasonal modifier.
    pub fn estimate_eta<S: AsRef<str>>(
        &self,
        path:                &[S],
        distance:            f64,
        vehicle_type:        &str,
        cargo_weight:        f64,
        departure_unix_secs: i64,
        season:              Option<&str>,
    ) -> ServiceResult<EtaReport> {
        let distance = require_positive("distance", distance)?;
        let vehicle = self.vehicles.lookup(vehicle_type)?;
        let season = season.map(str::parse::<Season>).transpose()?;

        let path = if path.is_empty() {
            Vec::new()
        } else {
            let route = self.route_along(path)?;
            if (route.distance_km - distance).abs() > DISTANCE_TOLERANCE * route.distance_km {
                return Err(InvalidRequest::new(
                    "distance",
                    distance,
                    "does not match the length of the given path",
                )
                .into());
            }
            self.names(&route.cities)
        };

        let departure = Departure { unix_secs: departure_unix_secs, season };
        let est = self.eta.estimate(distance, vehicle, cargo_weight, &departure)?;
        Ok(EtaReport {
            path,
            distance,
            vehicle_type:        vehicle.class.to_string(),
            base_hours:          est.base_hours,
            estimated_hours:     est.estimated_hours,
            departure_unix_secs: est.departure_unix_secs,
            arrival_unix_secs:   est.arrival_unix_secs,
            risk_factors:        est.risk_factors,
        })
    }

    /// Name of the network city closest to `pos` (straight-line).
    pub fn nearest_city(&self, pos: GeoPoint) -> ServiceResult<String> {
        if !pos.is_valid() {
            return Err(InvalidRequest::new("coordinates", pos, "latitude or longitude out of range").into());
        }
        let city = self
            .graph
            .nearest_city(pos)
            .ok_or_else(|| ServiceError::Config("city network is empty".into()))?;
        Ok(self.graph.name(city).to_owned())
    }

    /// Build the export document for `report` without writing it.
    pub fn route_export(&self, report: &RouteReport, generated_at_unix_secs: i64) -> RouteExport {
        RouteExport::from_report(report, self.config.flat_cost_per_km, generated_at_unix_secs)
    }

    /// Write `report` as a pretty-printed JSON itinerary.
    pub fn export_route<W: Write>(
        &self,
        report: &RouteReport,
        generated_at_unix_secs: i64,
        writer: W,
    ) -> ServiceResult<()> {
        self.route_export(report, generated_at_unix_secs).write_json(writer)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn names(&self, ids: &[CityId]) -> Vec<String> {
        ids.iter().map(|&c| self.graph.name(c).to_owned()).collect()
    }

    /// A `Route` that follows `names` exactly instead of searching.
    fn route_along<S: AsRef<str>>(&self, names: &[S]) -> ServiceResult<Route> {
        let cities = names
            .iter()
            .map(|n| self.graph.resolve(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let leg_km = self.graph.path_legs(&cities)?;
        let distance_km: f64 = leg_km.iter().sum();
        Ok(Route {
            cities,
            leg_km,
            distance_km,
            time_hours: distance_km / self.config.avg_speed_kmh,
        })
    }

    fn route_report(&self, route: &Route) -> RouteReport {
        let speed = self.config.avg_speed_kmh;
        RouteReport {
            path:        self.names(&route.cities),
            distance:    route.distance_km,
            time_hours:  route.time_hours,
            coordinates: route.cities.iter().map(|&c| self.graph.position(c).as_tuple()).collect(),
            segments: route
                .legs()
                .map(|(from, to, km)| SegmentReport {
                    from:        self.graph.name(from).to_owned(),
                    to:          self.graph.name(to).to_owned(),
                    distance_km: km,
                    time_hours:  km / speed,
                })
                .collect(),
        }
    }
}
