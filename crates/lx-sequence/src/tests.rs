//! Unit tests for lx-sequence.

#[cfg(test)]
mod helpers {
    use lx_core::{CityId, GeoPoint};
    use lx_network::{CityGraph, CityGraphBuilder};

    /// ```text
    ///   A --100-- B --150-- C --150-- D        E (isolated)
    ///    \_______300_______/
    /// ```
    ///
    /// From A the road distances are B=100, C=250, D=400.
    pub fn line_network() -> (CityGraph, [CityId; 5]) {
        let mut b = CityGraphBuilder::new();
        let a = b.add_city("A", GeoPoint::new(0.0, 0.0)).unwrap();
        let bb = b.add_city("B", GeoPoint::new(0.0, 1.0)).unwrap();
        let c = b.add_city("C", GeoPoint::new(0.0, 2.0)).unwrap();
        let d = b.add_city("D", GeoPoint::new(0.0, 3.0)).unwrap();
        let e = b.add_city("E", GeoPoint::new(9.0, 9.0)).unwrap();
        b.add_road(a, bb, 100.0).unwrap();
        b.add_road(bb, c, 150.0).unwrap();
        b.add_road(a, c, 300.0).unwrap();
        b.add_road(c, d, 150.0).unwrap();
        (b.build(), [a, bb, c, d, e])
    }

    /// Hub S with spokes to P, Q, R of equal length 10.
    pub fn star(insert_reversed: bool) -> CityGraph {
        let mut b = CityGraphBuilder::new();
        let mut spokes = vec!["P", "Q", "R"];
        if insert_reversed {
            spokes.reverse();
        }
        let s = b.add_city("S", GeoPoint::new(0.0, 0.0)).unwrap();
        for (i, name) in spokes.into_iter().enumerate() {
            let id = b.add_city(name, GeoPoint::new(1.0, i as f64)).unwrap();
            b.add_road(s, id, 10.0).unwrap();
        }
        b.build()
    }
}

// ── Greedy ordering ───────────────────────────────────────────────────────────

#[cfg(test)]
mod ordering {
    use lx_network::{CachedRouter, DijkstraRouter};

    use super::helpers::*;
    use crate::Sequencer;

    #[test]
    fn nearest_first_from_start() {
        let (g, [a, b, c, d, _]) = line_network();
        let router = DijkstraRouter::default();
        let seq = Sequencer::new(&router).sequence(&g, a, &[d, c, b]).unwrap();
        assert_eq!(seq.order, vec![b, c, d]);
        assert_eq!(seq.start, a);
        assert_eq!(seq.total_distance_km, 400.0);
    }

    #[test]
    fn legs_chain_from_start_through_each_stop() {
        let (g, [a, b, c, d, _]) = line_network();
        let router = DijkstraRouter::default();
        let seq = Sequencer::new(&router).sequence(&g, a, &[b, c, d]).unwrap();
        assert_eq!(seq.legs.len(), 3);
        let mut at = a;
        for (leg, &stop) in seq.legs.iter().zip(&seq.order) {
            assert_eq!(leg.origin(), at);
            assert_eq!(leg.destination(), stop);
            at = stop;
        }
        let sum: f64 = seq.legs.iter().map(|l| l.distance_km).sum();
        assert_eq!(sum, seq.total_distance_km);
    }

    #[test]
    fn tied_step_goes_to_smaller_name() {
        // From C, B and D are both 150 km away.
        let (g, [_, b, c, d, _]) = line_network();
        let router = DijkstraRouter::default();
        let seq = Sequencer::new(&router).sequence(&g, c, &[d, b]).unwrap();
        assert_eq!(seq.order, vec![b, d]);
        assert_eq!(seq.total_distance_km, 150.0 + 300.0);
    }

    #[test]
    fn equal_distances_break_by_name() {
        for reversed in [false, true] {
            let g = star(reversed);
            let s = g.city_id("S").unwrap();
            let stops: Vec<_> = ["R", "P", "Q"].iter().map(|n| g.city_id(n).unwrap()).collect();
            let router = DijkstraRouter::default();
            let seq = Sequencer::new(&router).sequence(&g, s, &stops).unwrap();
            let names: Vec<&str> = seq.order.iter().map(|&c| g.name(c)).collect();
            assert_eq!(names, ["P", "Q", "R"]);
        }
    }

    #[test]
    fn works_through_a_cached_router() {
        let (g, [a, b, c, d, _]) = line_network();
        let router = CachedRouter::new(DijkstraRouter::default());
        let first = Sequencer::new(&router).sequence(&g, a, &[b, c, d]).unwrap();
        assert!(!router.is_empty());
        let second = Sequencer::new(&router).sequence(&g, a, &[b, c, d]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn by_name_resolves_case_insensitively() {
        let (g, [_, b, c, d, _]) = line_network();
        let router = DijkstraRouter::default();
        let seq = Sequencer::new(&router).sequence_by_name(&g, "a", &["d", "B", " c "]).unwrap();
        assert_eq!(seq.order, vec![b, c, d]);
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use lx_core::CityId;
    use lx_network::{DijkstraRouter, NetworkError};

    use super::helpers::*;
    use crate::{SequenceError, Sequencer};

    #[test]
    fn duplicates_are_collapsed() {
        let (g, [a, b, c, _, _]) = line_network();
        let router = DijkstraRouter::default();
        let seq = Sequencer::new(&router).sequence(&g, a, &[c, b, c, b]).unwrap();
        assert_eq!(seq.order, vec![b, c]);
    }

    #[test]
    fn fewer_than_two_distinct_stops_rejected() {
        let (g, [a, b, _, _, _]) = line_network();
        let router = DijkstraRouter::default();
        let seq = Sequencer::new(&router);
        for stops in [vec![], vec![b], vec![b, b], vec![a, b]] {
            match seq.sequence(&g, a, &stops) {
                Err(SequenceError::Invalid(e)) => assert_eq!(e.field, "stops"),
                other => panic!("expected invalid stops for {stops:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unreachable_stop_is_no_route() {
        let (g, [a, b, _, _, e]) = line_network();
        let router = DijkstraRouter::default();
        let err = Sequencer::new(&router).sequence(&g, a, &[b, e]).unwrap_err();
        assert!(matches!(err, SequenceError::Routing(NetworkError::NoRoute { .. })));
    }

    #[test]
    fn unknown_ids_and_names_rejected() {
        let (g, [a, b, _, _, _]) = line_network();
        let router = DijkstraRouter::default();
        let seq = Sequencer::new(&router);
        assert!(matches!(
            seq.sequence(&g, a, &[b, CityId(99)]),
            Err(SequenceError::Routing(NetworkError::UnknownCity(_)))
        ));
        assert!(matches!(
            seq.sequence(&g, CityId(99), &[a, b]),
            Err(SequenceError::Routing(NetworkError::UnknownCity(_)))
        ));
        assert!(matches!(
            seq.sequence_by_name(&g, "A", &["B", "Atlantis"]),
            Err(SequenceError::Routing(NetworkError::UnknownCity(name))) if name == "Atlantis"
        ));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use lx_core::{CityId, GeoPoint};
    use lx_network::{CityGraph, CityGraphBuilder, DijkstraRouter, Router};

    use crate::Sequencer;

    /// `(city_count, roads)`: a chain C0–C1–…–Cn-1 plus random chords.
    fn network_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
        (3usize..9)
            .prop_flat_map(|n| {
                let chain = prop::collection::vec(1u32..20, n - 1);
                let chords = prop::collection::vec((0..n, 0..n, 1u32..20), 0..n * 2);
                (Just(n), chain, chords)
            })
            .prop_map(|(n, chain, chords)| {
                let mut seen = BTreeSet::new();
                let chain = chain.into_iter().enumerate().map(|(i, w)| (i, i + 1, w));
                let roads = chain
                    .chain(chords)
                    .filter(|&(x, y, _)| x != y && seen.insert((x.min(y), x.max(y))))
                    .collect();
                (n, roads)
            })
    }

    fn build(n: usize, roads: &[(usize, usize, u32)]) -> CityGraph {
        let mut b = CityGraphBuilder::new();
        for i in 0..n {
            b.add_city(format!("C{i}"), GeoPoint::new(0.0, i as f64 * 0.1)).unwrap();
        }
        for &(x, y, w) in roads {
            b.add_road(CityId(x as u32), CityId(y as u32), f64::from(w)).unwrap();
        }
        b.build()
    }

    proptest! {
        #[test]
        fn every_stop_visited_once_greedily((n, roads) in network_strategy()) {
            let g = build(n, &roads);
            let router = DijkstraRouter::default();
            let start = CityId(0);
            let stops: Vec<CityId> = g.cities().filter(|&c| c != start).collect();
            let seq = Sequencer::new(&router).sequence(&g, start, &stops).unwrap();

            let visited: BTreeSet<CityId> = seq.order.iter().copied().collect();
            prop_assert_eq!(visited.len(), seq.order.len());
            prop_assert_eq!(visited, stops.iter().copied().collect::<BTreeSet<_>>());
            prop_assert!(!seq.order.contains(&start));

            // Each step is no longer than the route to any stop still pending.
            let mut at = start;
            for (i, leg) in seq.legs.iter().enumerate() {
                for &later in &seq.order[i + 1..] {
                    let alt = router.route(&g, at, later).unwrap();
                    prop_assert!(leg.distance_km <= alt.distance_km);
                }
                at = seq.order[i];
            }
            let sum: f64 = seq.legs.iter().map(|l| l.distance_km).sum();
            prop_assert!((sum - seq.total_distance_km).abs() < 1e-9);
        }
    }
}
