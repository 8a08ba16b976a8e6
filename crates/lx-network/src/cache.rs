//! Read-through route cache.
//!
//! Routes over an immutable graph are pure functions of `(from, to)`, so a
//! computed route can be reused for the life of the graph.  Concurrent
//! misses on the same key may both compute; the first insert wins and the
//! duplicate is dropped.  Errors are never cached.

use std::sync::{PoisonError, RwLock};

use log::trace;
use rustc_hash::FxHashMap;

use lx_core::CityId;

use crate::network::CityGraph;
use crate::router::{check_endpoints, Route, Router};
use crate::NetworkResult;

/// Wraps a [`Router`] with a `(from, to)`-keyed cache.
///
/// A `CachedRouter` must only ever be queried against one graph: ids are not
/// namespaced per graph.
pub struct CachedRouter<R: Router> {
    inner: R,
    cache: RwLock<FxHashMap<(CityId, CityId), Route>>,
}

impl<R: Router> CachedRouter<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, cache: RwLock::new(FxHashMap::default()) }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Number of cached routes.
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl<R: Router> Router for CachedRouter<R> {
    fn route(&self, graph: &CityGraph, from: CityId, to: CityId) -> NetworkResult<Route> {
        check_endpoints(graph, from, to)?;

        // Poisoning is ignored: the map is never left half-written.
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(from, to))
        {
            trace!("route cache hit {from} -> {to}");
            return Ok(hit.clone());
        }

        trace!("route cache miss {from} -> {to}");
        let route = self.inner.route(graph, from, to)?;
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry((from, to)).or_insert(route).clone())
    }
}
