//! City road graph and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format.  Every undirected
//! road is stored as two directed arcs with identical weight.  Given a
//! `CityId c`, its outgoing arcs occupy the slice:
//!
//! ```text
//! arc_to[ node_out_start[c] .. node_out_start[c+1] ]
//! ```
//!
//! Within that slice arcs are sorted by the lexicographic rank of the
//! neighbour's name, so iteration order (and therefore Dijkstra's tie
//! behaviour) never depends on the order roads were loaded in.
//!
//! # Invariants
//!
//! Checked once by [`CityGraphBuilder`], then relied on everywhere:
//!
//! - city names are unique and non-empty;
//! - roads join two distinct existing cities, at most once per pair;
//! - road weights are strictly positive and finite.
//!
//! Connectivity is *not* enforced; see [`CityGraph::is_connected`].
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `CityId`, used to
//! snap a map coordinate onto the network.

use std::collections::VecDeque;

use log::warn;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::{FxHashMap, FxHashSet};

use lx_core::{ArcId, CityId, GeoPoint, InvalidRequest};

use crate::{NetworkError, NetworkResult};

/// Fraction of the great-circle distance a road may fall short of before it
/// is reported; absorbs rounding in published road tables.
const STRAIGHT_LINE_SLACK: f64 = 0.99;

/// `true` if `km` is shorter than any road between `a` and `b` could be.
fn shorter_than_straight_line(a: GeoPoint, b: GeoPoint, km: f64) -> bool {
    km < a.distance_km(b) * STRAIGHT_LINE_SLACK
}

// ── R-tree city entry ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct CityEntry {
    point: [f64; 2], // [lat, lon]
    id: CityId,
}

impl RTreeObject for CityEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CityEntry {
    /// Squared Euclidean distance in degree space.  Good enough to pick the
    /// nearest of a few dozen cities; not a metric distance.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── CityGraph ─────────────────────────────────────────────────────────────────

/// Immutable undirected city graph in CSR format plus a spatial index.
///
/// `CityGraph` is `Send + Sync` and never mutated after [`CityGraphBuilder::build`];
/// share it behind an `Arc` for concurrent readers.
#[derive(Debug)]
pub struct CityGraph {
    // ── City data (indexed by CityId) ─────────────────────────────────────
    names:     Vec<String>,
    positions: Vec<GeoPoint>,
    /// Position of each city in the lexicographically sorted name list.
    name_rank: Vec<u32>,

    // ── CSR arc adjacency ─────────────────────────────────────────────────
    /// Length = `city_count + 1`.
    node_out_start: Vec<u32>,
    /// Source city of each arc; lets route reconstruction walk `prev_arc`.
    arc_from: Vec<CityId>,
    arc_to:   Vec<CityId>,
    arc_km:   Vec<f64>,

    // ── Lookup ────────────────────────────────────────────────────────────
    by_name: FxHashMap<String, CityId>,
    /// Lower-cased name → id, only for names that fold uniquely.
    by_folded_name: FxHashMap<String, CityId>,
    spatial_idx: RTree<CityEntry>,
}

impl CityGraph {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn city_count(&self) -> usize {
        self.names.len()
    }

    /// Number of undirected roads (half the arc count).
    pub fn road_count(&self) -> usize {
        self.arc_to.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn contains(&self, city: CityId) -> bool {
        city.index() < self.names.len()
    }

    // ── City attributes ───────────────────────────────────────────────────
    //
    // Accessors index directly: a `CityId` is only ever minted by the builder
    // of this graph.

    #[inline]
    pub fn name(&self, city: CityId) -> &str {
        &self.names[city.index()]
    }

    #[inline]
    pub fn position(&self, city: CityId) -> GeoPoint {
        self.positions[city.index()]
    }

    /// Lexicographic rank of the city's name; the tie-break key for routing.
    #[inline]
    pub fn name_rank(&self, city: CityId) -> u32 {
        self.name_rank[city.index()]
    }

    /// All city ids in insertion order.
    pub fn cities(&self) -> impl Iterator<Item = CityId> + '_ {
        (0..self.names.len()).map(|i| CityId(i as u32))
    }

    /// All city ids sorted by name.
    pub fn cities_sorted(&self) -> Vec<CityId> {
        let mut ids: Vec<CityId> = self.cities().collect();
        ids.sort_unstable_by_key(|&c| self.name_rank(c));
        ids
    }

    // ── Name lookup ───────────────────────────────────────────────────────

    /// Exact name lookup.
    pub fn city_id(&self, name: &str) -> NetworkResult<CityId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownCity(name.to_owned()))
    }

    /// Lenient lookup for user input: trims whitespace, then tries an exact
    /// match and finally an ASCII case-insensitive one.  Non-ASCII letters
    /// must match exactly.
    pub fn resolve(&self, name: &str) -> NetworkResult<CityId> {
        let trimmed = name.trim();
        if let Some(&id) = self.by_name.get(trimmed) {
            return Ok(id);
        }
        self.by_folded_name
            .get(&trimmed.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| NetworkError::UnknownCity(name.to_owned()))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Outgoing arcs of `city`, in neighbour-name order.
    #[inline]
    pub fn out_arcs(&self, city: CityId) -> impl Iterator<Item = ArcId> + '_ {
        let start = self.node_out_start[city.index()];
        let end   = self.node_out_start[city.index() + 1];
        (start..end).map(ArcId)
    }

    #[inline]
    pub fn arc_from(&self, arc: ArcId) -> CityId {
        self.arc_from[arc.index()]
    }

    #[inline]
    pub fn arc_to(&self, arc: ArcId) -> CityId {
        self.arc_to[arc.index()]
    }

    #[inline]
    pub fn arc_km(&self, arc: ArcId) -> f64 {
        self.arc_km[arc.index()]
    }

    /// `(neighbour, km)` pairs adjacent to `city`, in neighbour-name order.
    ///
    /// # Panics
    ///
    /// If `city` was not minted by this graph.  Check untrusted ids with
    /// [`contains`](Self::contains), or go through
    /// [`neighbors_of`](Self::neighbors_of), which reports `UnknownCity`.
    pub fn neighbors(&self, city: CityId) -> impl Iterator<Item = (CityId, f64)> + '_ {
        self.out_arcs(city).map(|a| (self.arc_to(a), self.arc_km(a)))
    }

    /// Name-level form of [`neighbors`](Self::neighbors).
    pub fn neighbors_of(&self, name: &str) -> NetworkResult<Vec<(&str, f64)>> {
        let city = self.city_id(name)?;
        Ok(self.neighbors(city).map(|(n, km)| (self.name(n), km)).collect())
    }

    /// Weight of the road joining `a` and `b`, if there is one.
    pub fn edge_km(&self, a: CityId, b: CityId) -> Option<f64> {
        self.neighbors(a).find(|&(n, _)| n == b).map(|(_, km)| km)
    }

    /// Per-hop road distances along `path`.
    ///
    /// Fails if the path has fewer than two cities or two consecutive cities
    /// are not joined by a road.
    pub fn path_legs(&self, path: &[CityId]) -> NetworkResult<Vec<f64>> {
        if path.len() < 2 {
            return Err(InvalidRequest::new("path", path.len(), "a path needs at least two cities").into());
        }
        path.windows(2)
            .map(|pair| {
                let (a, b) = (pair[0], pair[1]);
                self.edge_km(a, b).ok_or_else(|| {
                    NetworkError::from(InvalidRequest::new(
                        "path",
                        format!("{} -> {}", self.name(a), self.name(b)),
                        "consecutive cities are not joined by a road",
                    ))
                })
            })
            .collect()
    }

    /// `true` if every city can reach every other city.  An empty graph is
    /// trivially connected.
    /// Roads, as `(a, b, km)` with `a < b`, whose weight is below the
    /// great-circle distance between their cities.  Usually a data-entry
    /// error in the road table.
    pub fn implausible_roads(&self) -> Vec<(CityId, CityId, f64)> {
        (0..self.arc_to.len() as u32)
            .map(ArcId)
            .filter(|&arc| self.arc_from(arc) < self.arc_to(arc))
            .filter(|&arc| {
                shorter_than_straight_line(
                    self.position(self.arc_from(arc)),
                    self.position(self.arc_to(arc)),
                    self.arc_km(arc),
                )
            })
            .map(|arc| (self.arc_from(arc), self.arc_to(arc), self.arc_km(arc)))
            .collect()
    }

    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.city_count()];
        let mut queue = VecDeque::from([CityId(0)]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(city) = queue.pop_front() {
            for (next, _) in self.neighbors(city) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == self.city_count()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest city to `pos`.  `None` only if the graph is empty.
    pub fn nearest_city(&self, pos: GeoPoint) -> Option<CityId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// Up to `k` nearest cities to `pos`, closest first.
    pub fn k_nearest_cities(&self, pos: GeoPoint, k: usize) -> Vec<CityId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

// ── CityGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`CityGraph`] incrementally, then call [`build`](Self::build).
///
/// Validation happens as cities and roads are added, so `build` itself
/// cannot fail.
///
/// # Example
///
/// ```
/// use lx_core::GeoPoint;
/// use lx_network::CityGraphBuilder;
///
/// let mut b = CityGraphBuilder::new();
/// let mumbai = b.add_city("Mumbai", GeoPoint::new(19.0760, 72.8777))?;
/// let pune   = b.add_city("Pune", GeoPoint::new(18.5204, 73.8567))?;
/// b.add_road(mumbai, pune, 150.0)?;
/// let graph = b.build();
/// assert_eq!(graph.city_count(), 2);
/// assert_eq!(graph.road_count(), 1);
/// # Ok::<(), lx_network::NetworkError>(())
/// ```
#[derive(Default)]
pub struct CityGraphBuilder {
    names:     Vec<String>,
    positions: Vec<GeoPoint>,
    by_name:   FxHashMap<String, CityId>,
    roads:     Vec<RawRoad>,
    seen_pairs: FxHashSet<(CityId, CityId)>,
}

struct RawRoad {
    a:  CityId,
    b:  CityId,
    km: f64,
}

impl CityGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city and return its `CityId` (sequential from 0).
    pub fn add_city(&mut self, name: impl Into<String>, pos: GeoPoint) -> NetworkResult<CityId> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(NetworkError::Build("city name must not be empty".into()));
        }
        if !pos.is_valid() {
            return Err(NetworkError::Build(format!("city {name:?} has invalid coordinates {pos}")));
        }
        if self.by_name.contains_key(&name) {
            return Err(NetworkError::DuplicateCity(name));
        }
        let id = CityId::try_from(self.names.len())
            .map_err(|_| NetworkError::Build("too many cities".into()))?;
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        self.positions.push(pos);
        Ok(id)
    }

    /// Add an undirected road of `km` between two cities added earlier.
    pub fn add_road(&mut self, a: CityId, b: CityId, km: f64) -> NetworkResult<()> {
        for city in [a, b] {
            if city.index() >= self.names.len() {
                return Err(NetworkError::Build(format!("{city} was not added to this builder")));
            }
        }
        if a == b {
            return Err(NetworkError::Build(format!(
                "road from {:?} to itself",
                self.names[a.index()]
            )));
        }
        lx_core::require_positive("km", km)?;
        let (pa, pb) = (self.positions[a.index()], self.positions[b.index()]);
        if shorter_than_straight_line(pa, pb, km) {
            warn!(
                "road {:?} - {:?} is {} km but the cities are {:.1} km apart",
                self.names[a.index()],
                self.names[b.index()],
                km,
                pa.distance_km(pb)
            );
        }
        if !self.seen_pairs.insert((a.min(b), a.max(b))) {
            return Err(NetworkError::DuplicateRoad {
                a: self.names[a.index()].clone(),
                b: self.names[b.index()].clone(),
            });
        }
        self.roads.push(RawRoad { a, b, km });
        Ok(())
    }

    /// [`add_road`](Self::add_road) addressed by city name.
    pub fn add_road_by_name(&mut self, a: &str, b: &str, km: f64) -> NetworkResult<()> {
        let a = self.city_id(a)?;
        let b = self.city_id(b)?;
        self.add_road(a, b, km)
    }

    pub fn city_id(&self, name: &str) -> NetworkResult<CityId> {
        self.by_name
            .get(name.trim())
            .copied()
            .ok_or_else(|| NetworkError::UnknownCity(name.to_owned()))
    }

    pub fn city_count(&self) -> usize { self.names.len() }
    pub fn road_count(&self) -> usize { self.roads.len() }

    /// Consume the builder and produce a [`CityGraph`].
    ///
    /// Time complexity: O(E log E) for the arc sort + O(V log V) for name
    /// ranking and the R-tree bulk load.
    pub fn build(self) -> CityGraph {
        let city_count = self.names.len();

        // Lexicographic rank per city.
        let mut order: Vec<usize> = (0..city_count).collect();
        order.sort_unstable_by(|&x, &y| self.names[x].cmp(&self.names[y]));
        let mut name_rank = vec![0u32; city_count];
        for (rank, &city) in order.iter().enumerate() {
            name_rank[city] = rank as u32;
        }

        // Expand each road into two arcs, sorted by source then neighbour rank.
        let mut arcs: Vec<(CityId, CityId, f64)> = Vec::with_capacity(self.roads.len() * 2);
        for r in &self.roads {
            arcs.push((r.a, r.b, r.km));
            arcs.push((r.b, r.a, r.km));
        }
        arcs.sort_unstable_by_key(|&(from, to, _)| (from, name_rank[to.index()]));

        let arc_from: Vec<CityId> = arcs.iter().map(|a| a.0).collect();
        let arc_to:   Vec<CityId> = arcs.iter().map(|a| a.1).collect();
        let arc_km:   Vec<f64>    = arcs.iter().map(|a| a.2).collect();

        // CSR row pointer.
        let mut node_out_start = vec![0u32; city_count + 1];
        for &(from, _, _) in &arcs {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=city_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[city_count] as usize, arcs.len());

        // Case-folded index, dropping names that collide once folded.
        let mut by_folded_name: FxHashMap<String, CityId> = FxHashMap::default();
        let mut ambiguous: FxHashSet<String> = FxHashSet::default();
        for (i, name) in self.names.iter().enumerate() {
            let folded = name.to_ascii_lowercase();
            if by_folded_name.insert(folded.clone(), CityId(i as u32)).is_some() {
                ambiguous.insert(folded);
            }
        }
        for folded in &ambiguous {
            by_folded_name.remove(folded);
        }

        let entries: Vec<CityEntry> = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, pos)| CityEntry { point: [pos.lat, pos.lon], id: CityId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        CityGraph {
            names: self.names,
            positions: self.positions,
            name_rank,
            node_out_start,
            arc_from,
            arc_to,
            arc_km,
            by_name: self.by_name,
            by_folded_name,
            spatial_idx,
        }
    }
}
