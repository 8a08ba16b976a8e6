//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Downstream crates call routing through the [`Router`] trait, so a cached
//! or alternative implementation can be swapped in without touching
//! callers.  [`DijkstraRouter`] is the reference implementation and
//! [`CachedRouter`](crate::CachedRouter) wraps any router with a
//! read-through cache.
//!
//! # Determinism
//!
//! The frontier is ordered by `(cumulative km, name rank)` and arcs are
//! scanned in neighbour-name order, with relaxation only on strict
//! improvement.  The same graph therefore always yields the same path, even
//! when several paths share the minimum distance.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::debug;

use lx_core::{ArcId, CityId, InvalidRequest};

use crate::network::CityGraph;
use crate::{NetworkError, NetworkResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Cities visited in order, source first, destination last.
    pub cities: Vec<CityId>,
    /// Road distance of each hop; `leg_km[i]` joins `cities[i]` and
    /// `cities[i + 1]`.
    pub leg_km: Vec<f64>,
    /// Sum of `leg_km`.
    pub distance_km: f64,
    /// `distance_km` at the router's assumed average speed.
    pub time_hours: f64,
}

impl Route {
    pub fn origin(&self) -> CityId {
        self.cities.first().copied().unwrap_or(CityId::INVALID)
    }

    pub fn destination(&self) -> CityId {
        self.cities.last().copied().unwrap_or(CityId::INVALID)
    }

    /// Number of roads traversed.
    pub fn hops(&self) -> usize {
        self.leg_km.len()
    }

    /// `(from, to, km)` for every hop, in travel order.
    pub fn legs(&self) -> impl Iterator<Item = (CityId, CityId, f64)> + '_ {
        self.cities
            .windows(2)
            .zip(&self.leg_km)
            .map(|(pair, &km)| (pair[0], pair[1], km))
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve concurrent
/// requests against a shared graph.
pub trait Router: Send + Sync {
    /// Least-distance route from `from` to `to`.
    ///
    /// Fails with `UnknownCity` for ids not in `graph`, `Invalid` when
    /// `from == to`, and `NoRoute` when `to` is unreachable.
    fn route(&self, graph: &CityGraph, from: CityId, to: CityId) -> NetworkResult<Route>;

    /// [`route`](Self::route) addressed by (leniently resolved) city names.
    fn route_by_name(&self, graph: &CityGraph, from: &str, to: &str) -> NetworkResult<Route> {
        let from = graph.resolve(from)?;
        let to = graph.resolve(to)?;
        self.route(graph, from, to)
    }
}

/// Shared argument checks for every `Router` implementation.
pub(crate) fn check_endpoints(graph: &CityGraph, from: CityId, to: CityId) -> NetworkResult<()> {
    for city in [from, to] {
        if !graph.contains(city) {
            return Err(NetworkError::UnknownCity(city.to_string()));
        }
    }
    if from == to {
        return Err(InvalidRequest::new(
            "destination",
            graph.name(to),
            "source and destination are the same city",
        )
        .into());
    }
    Ok(())
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Binary-heap Dijkstra over the CSR city graph, O((V + E) log V).
///
/// Stops as soon as the destination is settled.
#[derive(Debug, Clone, Copy)]
pub struct DijkstraRouter {
    /// Used only to derive `Route::time_hours`.
    pub avg_speed_kmh: f64,
}

impl DijkstraRouter {
    pub fn new(avg_speed_kmh: f64) -> Self {
        Self { avg_speed_kmh }
    }
}

impl Default for DijkstraRouter {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl Router for DijkstraRouter {
    fn route(&self, graph: &CityGraph, from: CityId, to: CityId) -> NetworkResult<Route> {
        check_endpoints(graph, from, to)?;
        let route = dijkstra(graph, from, to, self.avg_speed_kmh)?;
        debug!(
            "route {} -> {}: {:.1} km over {} hops",
            graph.name(from),
            graph.name(to),
            route.distance_km,
            route.hops()
        );
        Ok(route)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Frontier entry.  Ordered by distance, then name rank; `city` is carried
/// along but never decides the order because ranks are unique.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    km:   f64,
    rank: u32,
    city: CityId,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.km
            .total_cmp(&other.km)
            .then(self.rank.cmp(&other.rank))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

fn dijkstra(graph: &CityGraph, from: CityId, to: CityId, avg_speed_kmh: f64) -> NetworkResult<Route> {
    let n = graph.city_count();
    // dist[v] = best known km to reach v.
    let mut dist     = vec![f64::INFINITY; n];
    // prev_arc[v] = arc that reached v; ArcId::INVALID for the source and unreached cities.
    let mut prev_arc = vec![ArcId::INVALID; n];
    let mut settled  = vec![false; n];

    dist[from.index()] = 0.0;

    // Reverse turns BinaryHeap (max) into a min-heap.
    let mut heap: BinaryHeap<Reverse<Frontier>> = BinaryHeap::new();
    heap.push(Reverse(Frontier { km: 0.0, rank: graph.name_rank(from), city: from }));

    while let Some(Reverse(Frontier { km, city, .. })) = heap.pop() {
        // Stale entry: a shorter path already settled this city.
        if settled[city.index()] {
            continue;
        }
        settled[city.index()] = true;

        if city == to {
            return Ok(reconstruct(graph, &prev_arc, to, avg_speed_kmh));
        }

        for arc in graph.out_arcs(city) {
            let next = graph.arc_to(arc);
            if settled[next.index()] {
                continue;
            }
            let candidate = km + graph.arc_km(arc);
            if candidate < dist[next.index()] {
                dist[next.index()] = candidate;
                prev_arc[next.index()] = arc;
                heap.push(Reverse(Frontier { km: candidate, rank: graph.name_rank(next), city: next }));
            }
        }
    }

    debug!("no route {} -> {}", graph.name(from), graph.name(to));
    Err(NetworkError::NoRoute {
        from: graph.name(from).to_owned(),
        to:   graph.name(to).to_owned(),
    })
}

fn reconstruct(graph: &CityGraph, prev_arc: &[ArcId], to: CityId, avg_speed_kmh: f64) -> Route {
    let mut cities = vec![to];
    let mut leg_km = Vec::new();
    let mut cur = to;
    loop {
        let arc = prev_arc[cur.index()];
        if arc == ArcId::INVALID {
            break;
        }
        leg_km.push(graph.arc_km(arc));
        cur = graph.arc_from(arc);
        cities.push(cur);
    }
    cities.reverse();
    leg_km.reverse();

    // Summed source-first, the same order Dijkstra accumulated in.
    let distance_km: f64 = leg_km.iter().sum();
    Route {
        cities,
        leg_km,
        distance_km,
        time_hours: distance_km / avg_speed_kmh,
    }
}
