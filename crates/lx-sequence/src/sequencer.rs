//! Greedy nearest-neighbour sequencer.

use log::debug;

use lx_core::{CityId, InvalidRequest};
use lx_network::{CityGraph, NetworkError, NetworkResult, Route, Router};

use crate::SequenceResult;

// ── StopSequence ──────────────────────────────────────────────────────────────

/// A visiting order for a set of stops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopSequence {
    pub start: CityId,
    /// Every requested stop exactly once, in visiting order.  Excludes
    /// `start`.
    pub order: Vec<CityId>,
    /// `legs[i]` is the route driven to reach `order[i]`.
    pub legs: Vec<Route>,
    /// Sum of leg distances.  No return to `start` is included.
    pub total_distance_km: f64,
}

// ── Sequencer ─────────────────────────────────────────────────────────────────

/// Orders stops by repeatedly driving to the nearest unvisited one.
///
/// Distances come from the wrapped [`Router`], so a `CachedRouter` makes the
/// O(n²) pairwise queries cheap across repeated requests.  Ties on distance
/// go to the lexicographically smaller city name.
pub struct Sequencer<'r, R: Router> {
    router: &'r R,
}

impl<'r, R: Router> Sequencer<'r, R> {
    pub fn new(router: &'r R) -> Self {
        Self { router }
    }

    /// Order `stops` starting from `start`.
    ///
    /// Duplicate stops and stops equal to `start` are ignored; fewer than two
    /// remaining is an `Invalid` error on field `"stops"`.  A stop that
    /// cannot be reached fails the whole request with `NoRoute`.
    pub fn sequence(
        &self,
        graph: &CityGraph,
        start: CityId,
        stops: &[CityId],
    ) -> SequenceResult<StopSequence> {
        if !graph.contains(start) {
            return Err(NetworkError::UnknownCity(start.to_string()).into());
        }
        let mut pending = distinct_stops(graph, start, stops)?;

        let mut order = Vec::with_capacity(pending.len());
        let mut legs = Vec::with_capacity(pending.len());
        let mut total_distance_km = 0.0;
        let mut current = start;

        while !pending.is_empty() {
            // `pending` is in name order, so keeping the first strict
            // minimum breaks distance ties lexicographically.
            let mut best: Option<(usize, Route)> = None;
            for (i, result) in self.routes_from(graph, current, &pending).into_iter().enumerate() {
                let route = result?;
                if best.as_ref().is_none_or(|(_, b)| route.distance_km < b.distance_km) {
                    best = Some((i, route));
                }
            }
            let Some((i, route)) = best else { break };

            let next = pending.remove(i);
            total_distance_km += route.distance_km;
            order.push(next);
            legs.push(route);
            current = next;
        }

        debug!(
            "sequenced {} stops from {}: {:.1} km",
            order.len(),
            graph.name(start),
            total_distance_km
        );
        Ok(StopSequence { start, order, legs, total_distance_km })
    }

    /// [`sequence`](Self::sequence) addressed by (leniently resolved) city
    /// names.
    pub fn sequence_by_name<S: AsRef<str>>(
        &self,
        graph: &CityGraph,
        start: &str,
        stops: &[S],
    ) -> SequenceResult<StopSequence> {
        let start = graph.resolve(start)?;
        let stops = stops
            .iter()
            .map(|s| graph.resolve(s.as_ref()))
            .collect::<NetworkResult<Vec<_>>>()?;
        self.sequence(graph, start, &stops)
    }

    #[cfg(not(feature = "parallel"))]
    fn routes_from(&self, graph: &CityGraph, from: CityId, to: &[CityId]) -> Vec<NetworkResult<Route>> {
        to.iter().map(|&city| self.router.route(graph, from, city)).collect()
    }

    #[cfg(feature = "parallel")]
    fn routes_from(&self, graph: &CityGraph, from: CityId, to: &[CityId]) -> Vec<NetworkResult<Route>> {
        use rayon::prelude::*;

        // Collecting into a Vec keeps candidate order, so selection below
        // is identical to the sequential path.
        to.par_iter().map(|&city| self.router.route(graph, from, city)).collect()
    }
}

/// Unique stops other than `start`, sorted by name.
fn distinct_stops(graph: &CityGraph, start: CityId, stops: &[CityId]) -> SequenceResult<Vec<CityId>> {
    if let Some(&bad) = stops.iter().find(|&&c| !graph.contains(c)) {
        return Err(NetworkError::UnknownCity(bad.to_string()).into());
    }
    let mut pending: Vec<CityId> = stops.iter().copied().filter(|&c| c != start).collect();
    pending.sort_by_key(|&c| graph.name_rank(c));
    pending.dedup();

    if pending.len() < 2 {
        let value = stops.iter().map(|&c| graph.name(c)).collect::<Vec<_>>().join(", ");
        return Err(InvalidRequest::new(
            "stops",
            value,
            "at least two distinct stops other than the start are required",
        )
        .into());
    }
    Ok(pending)
}
