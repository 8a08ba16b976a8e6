//! Unit tests for lx-cost.

#[cfg(test)]
mod helpers {
    use lx_core::{CityId, VehicleClass, VehicleProfile};
    use lx_network::Route;

    pub fn truck() -> VehicleProfile {
        VehicleProfile::standard(VehicleClass::HeavyTruck)
    }

    pub fn car() -> VehicleProfile {
        VehicleProfile::standard(VehicleClass::Car)
    }

    /// Three cities, two legs of 120 km and 80 km.
    pub fn two_leg_route() -> Route {
        Route {
            cities:      vec![CityId(0), CityId(1), CityId(2)],
            leg_km:      vec![120.0, 80.0],
            distance_km: 200.0,
            time_hours:  200.0 / 60.0,
        }
    }

    /// Unix time whose local (IST) wall clock reads `hour:00`.
    pub fn ist(hour: i64) -> i64 {
        hour * 3_600 - 19_800
    }
}

// ── Cost model ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cost {
    use approx::assert_relative_eq;

    use super::helpers::*;
    use crate::{CostError, CostModel};

    #[test]
    fn fuel_cost_is_distance_over_mileage_times_price() {
        let b = CostModel::default().estimate(1000.0, &truck(), 5000.0, 100.0).unwrap();
        assert_relative_eq!(b.fuel_cost, 20_000.0);
    }

    #[test]
    fn full_breakdown_for_heavy_truck() {
        let b = CostModel::default().estimate(1000.0, &truck(), 5000.0, 100.0).unwrap();
        assert_relative_eq!(b.toll_cost, 2_700.0);
        assert_relative_eq!(b.driver_cost, 5_000.0);
        // 1000 km × 2.5 × (1 + 5 t × 0.02)
        assert_relative_eq!(b.maintenance_cost, 2_750.0, epsilon = 1e-9);
        assert_relative_eq!(b.total, 30_450.0, epsilon = 1e-9);
        assert_relative_eq!(b.cost_per_km, 30.45, epsilon = 1e-12);
    }

    #[test]
    fn heavier_cargo_raises_only_maintenance() {
        let model = CostModel::default();
        let light = model.estimate(500.0, &car(), 100.0, 100.0).unwrap();
        let heavy = model.estimate(500.0, &car(), 10_000.0, 100.0).unwrap();
        assert_relative_eq!(light.fuel_cost, heavy.fuel_cost);
        assert_relative_eq!(light.toll_cost, heavy.toll_cost);
        assert_relative_eq!(light.driver_cost, heavy.driver_cost);
        assert!(heavy.maintenance_cost > light.maintenance_cost);
    }

    #[test]
    fn non_positive_inputs_name_the_field() {
        let model = CostModel::default();
        let cases = [
            (0.0, 1000.0, 100.0, "distance"),
            (100.0, -1.0, 100.0, "cargo_weight"),
            (100.0, 1000.0, f64::NAN, "fuel_price"),
        ];
        for (km, kg, price, field) in cases {
            match model.estimate(km, &truck(), kg, price) {
                Err(CostError::Invalid(e)) => assert_eq!(e.field, field),
                other => panic!("expected invalid {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn degenerate_vehicle_profile_rejected() {
        let mut v = truck();
        v.mileage_kmpl = 0.0;
        assert!(CostModel::default().estimate(100.0, &v, 1000.0, 100.0).is_err());
    }
}

// ── Toll estimator ────────────────────────────────────────────────────────────

#[cfg(test)]
mod toll {
    use approx::assert_relative_eq;

    use lx_core::{CityId, TollRates};

    use super::helpers::*;
    use crate::{CostError, TollEstimator};

    #[test]
    fn aggregate_toll_for_distance() {
        let t = TollEstimator::default().estimate_distance(200.0, &truck()).unwrap();
        assert_relative_eq!(t.total_toll, 540.0);
        assert!(t.segments.is_empty());
    }

    #[test]
    fn plaza_count_rounds_up() {
        let est = TollEstimator::default();
        assert_eq!(est.plaza_count(200.0), 4); // 3.2
        assert_eq!(est.plaza_count(125.0), 2); // exactly 2.0
        let sparse = TollEstimator::new(TollRates { plaza_density_per_100km: 0.0 });
        assert_eq!(sparse.plaza_count(1000.0), 0);
    }

    #[test]
    fn route_segments_use_exact_leg_distances() {
        let t = TollEstimator::default().estimate(&two_leg_route(), &truck()).unwrap();
        assert_eq!(t.segments.len(), 2);
        assert_eq!((t.segments[0].from, t.segments[0].to), (CityId(0), CityId(1)));
        assert_relative_eq!(t.segments[0].distance_km, 120.0);
        assert_relative_eq!(t.segments[0].toll, 324.0);
        assert_relative_eq!(t.segments[1].toll, 216.0);
        let sum: f64 = t.segments.iter().map(|s| s.toll).sum();
        assert_relative_eq!(sum, t.total_toll, epsilon = 1e-9);
    }

    #[test]
    fn malformed_route_rejected() {
        let mut route = two_leg_route();
        route.leg_km.pop();
        match TollEstimator::default().estimate(&route, &truck()) {
            Err(CostError::Invalid(e)) => assert_eq!(e.field, "route"),
            other => panic!("expected invalid route, got {other:?}"),
        }
    }

    #[test]
    fn zero_distance_rejected() {
        assert!(TollEstimator::default().estimate_distance(0.0, &car()).is_err());
    }
}

// ── ETA estimator ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod eta {
    use approx::assert_relative_eq;

    use super::helpers::*;
    use crate::{CostError, Departure, EtaEstimator, RiskKind, Season};

    fn kinds(est: &crate::EtaEstimate) -> Vec<RiskKind> {
        est.risk_factors.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn quiet_trip_only_rests() {
        // Car at 65 km/h: 650 km is 10 h of driving, so one break.
        let est = EtaEstimator::default()
            .estimate(650.0, &car(), 500.0, &Departure::at(ist(2)))
            .unwrap();
        assert_relative_eq!(est.base_hours, 10.0);
        assert_eq!(kinds(&est), vec![RiskKind::DriverRest]);
        assert_relative_eq!(est.estimated_hours, 10.5);
        assert_eq!(est.arrival_unix_secs, ist(2) + 37_800);
    }

    #[test]
    fn exactly_one_block_needs_no_break() {
        let est = EtaEstimator::default()
            .estimate(520.0, &car(), 500.0, &Departure::at(ist(2)))
            .unwrap();
        assert!(est.risk_factors.is_empty());
        assert_relative_eq!(est.estimated_hours, 8.0);
    }

    #[test]
    fn all_modifiers_listed_in_order() {
        // Heavy truck at 50 km/h: 500 km is a 10 h base.
        let departure = Departure::at(ist(9)).with_season(Season::Monsoon);
        let est = EtaEstimator::default()
            .estimate(500.0, &truck(), 12_000.0, &departure)
            .unwrap();
        assert_eq!(
            kinds(&est),
            vec![
                RiskKind::HeavyCargo,
                RiskKind::VehicleClass,
                RiskKind::Season,
                RiskKind::PeakDeparture,
                RiskKind::DriverRest,
            ]
        );
        let added: Vec<f64> = est.risk_factors.iter().map(|f| f.added_hours).collect();
        for (got, want) in added.iter().zip([1.0, 0.5, 2.0, 0.75, 0.5]) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
        assert_relative_eq!(est.estimated_hours, 14.75, epsilon = 1e-12);
        assert!(est.risk_factors[2].detail.contains("monsoon"));
        assert!(est.risk_factors[0].detail.contains("+10%"));
    }

    #[test]
    fn cargo_at_threshold_is_not_heavy() {
        let est = EtaEstimator::default()
            .estimate(100.0, &car(), 10_000.0, &Departure::at(ist(2)))
            .unwrap();
        assert!(est.risk_factors.iter().all(|f| f.kind != RiskKind::HeavyCargo));
    }

    #[test]
    fn dry_season_adds_nothing() {
        let departure = Departure::at(ist(2)).with_season(Season::Dry);
        let est = EtaEstimator::default().estimate(100.0, &car(), 100.0, &departure).unwrap();
        assert!(est.risk_factors.is_empty());
    }

    #[test]
    fn peak_windows_are_half_open() {
        let eta = EtaEstimator::default();
        let at = |hour| {
            eta.estimate(100.0, &car(), 100.0, &Departure::at(ist(hour)))
                .unwrap()
                .risk_factors
                .iter()
                .any(|f| f.kind == RiskKind::PeakDeparture)
        };
        assert!(!at(7));
        assert!(at(8));
        assert!(at(10));
        assert!(!at(11));
        assert!(at(17));
        assert!(!at(21));
    }

    #[test]
    fn local_hour_handles_offsets_and_negative_time() {
        let eta = EtaEstimator::default();
        assert_eq!(eta.local_hour(0), 5);
        assert_eq!(eta.local_hour(-3_600), 4);
        assert_eq!(eta.local_hour(ist(23)), 23);
        assert_eq!(eta.local_hour(ist(24)), 0);
        assert!(eta.local_hour(i64::MAX) < 24);
        assert!(eta.local_hour(i64::MIN) < 24);
    }

    #[test]
    fn estimate_route_uses_route_distance() {
        let eta = EtaEstimator::default();
        let by_route = eta
            .estimate_route(&two_leg_route(), &car(), 100.0, &Departure::at(ist(2)))
            .unwrap();
        let by_km = eta.estimate(200.0, &car(), 100.0, &Departure::at(ist(2))).unwrap();
        assert_eq!(by_route, by_km);
    }

    #[test]
    fn invalid_inputs_rejected() {
        let eta = EtaEstimator::default();
        assert!(eta.estimate(-5.0, &car(), 100.0, &Departure::at(0)).is_err());
        assert!(eta.estimate(100.0, &car(), 0.0, &Departure::at(0)).is_err());
    }

    fn rejected_field(res: crate::CostResult<crate::EtaEstimate>) -> &'static str {
        match res {
            Err(CostError::Invalid(e)) => e.field,
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn arrival_past_end_of_time_rejected() {
        let eta = EtaEstimator::default();
        let late = eta.estimate(100.0, &car(), 100.0, &Departure::at(i64::MAX - 10));
        assert_eq!(rejected_field(late), "departure_time");
        // Still fine when the arrival fits.
        let est = eta
            .estimate(100.0, &car(), 100.0, &Departure::at(i64::MAX - 1_000_000))
            .unwrap();
        assert!(est.arrival_unix_secs > i64::MAX - 1_000_000);
    }

    #[test]
    fn astronomical_distance_rejected() {
        let eta = EtaEstimator::default();
        let far = eta.estimate(1e300, &car(), 100.0, &Departure::at(1_700_000_000));
        assert_eq!(rejected_field(far), "distance");
        let max = eta.estimate(f64::MAX, &truck(), 100.0, &Departure::at(0));
        assert_eq!(rejected_field(max), "distance");
    }

    #[test]
    fn season_parsing() {
        assert_eq!("Monsoon".parse::<Season>().unwrap(), Season::Monsoon);
        assert_eq!(" winter ".parse::<Season>().unwrap(), Season::Winter);
        assert_eq!("summer".parse::<Season>().unwrap(), Season::Dry);
        let err = "spring".parse::<Season>().unwrap_err();
        assert_eq!(err.field, "season");
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use lx_core::{CityId, VehicleClass, VehicleProfile};
    use lx_network::Route;

    use crate::{CostError, CostModel, Departure, EtaEstimator, TollEstimator};

    fn any_class() -> impl Strategy<Value = VehicleClass> {
        prop::sample::select(VehicleClass::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn cost_total_is_sum_of_components(
            km in 1.0f64..5_000.0,
            kg in 1.0f64..40_000.0,
            price in 1.0f64..200.0,
            class in any_class(),
        ) {
            let v = VehicleProfile::standard(class);
            let b = CostModel::default().estimate(km, &v, kg, price).unwrap();
            let sum = b.fuel_cost + b.toll_cost + b.driver_cost + b.maintenance_cost;
            prop_assert!((b.total - sum).abs() <= 1e-9 * sum);
            prop_assert!(b.fuel_cost >= 0.0 && b.toll_cost >= 0.0);
            prop_assert!(b.driver_cost >= 0.0 && b.maintenance_cost >= 0.0);
            prop_assert!((b.cost_per_km * km - b.total).abs() <= 1e-9 * b.total);
        }

        #[test]
        fn toll_segments_sum_to_total(
            legs in prop::collection::vec(1u32..900, 1..8),
            class in any_class(),
        ) {
            let leg_km: Vec<f64> = legs.iter().map(|&k| f64::from(k)).collect();
            let route = Route {
                cities:      (0..=leg_km.len() as u32).map(CityId).collect(),
                distance_km: leg_km.iter().sum(),
                time_hours:  0.0,
                leg_km,
            };
            let t = TollEstimator::default()
                .estimate(&route, &VehicleProfile::standard(class))
                .unwrap();
            let sum: f64 = t.segments.iter().map(|s| s.toll).sum();
            prop_assert_eq!(t.segments.len(), route.hops());
            prop_assert!((sum - t.total_toll).abs() <= 1e-9 * t.total_toll.max(1.0));
        }

        #[test]
        fn eta_never_below_base(
            km in 1.0f64..5_000.0,
            kg in 1.0f64..40_000.0,
            secs in -1_000_000_000i64..4_000_000_000,
            class in any_class(),
        ) {
            let est = EtaEstimator::default()
                .estimate(km, &VehicleProfile::standard(class), kg, &Departure::at(secs))
                .unwrap();
            let added: f64 = est.risk_factors.iter().map(|f| f.added_hours).sum();
            prop_assert!(est.estimated_hours >= est.base_hours);
            prop_assert!((est.estimated_hours - est.base_hours - added).abs() < 1e-9);
            prop_assert!(est.arrival_unix_secs >= secs);
        }

        #[test]
        fn eta_extreme_inputs_never_panic(
            km in prop_oneof![1.0f64..5_000.0, 1e12f64..1e300],
            kg in 1.0f64..40_000.0,
            secs in prop_oneof![
                any::<i64>(),
                (i64::MAX - 1_000_000_000)..=i64::MAX,
                i64::MIN..=(i64::MIN + 1_000_000_000),
            ],
            class in any_class(),
        ) {
            let v = VehicleProfile::standard(class);
            match EtaEstimator::default().estimate(km, &v, kg, &Departure::at(secs)) {
                Ok(est) => {
                    prop_assert!(est.estimated_hours.is_finite());
                    prop_assert!(est.arrival_unix_secs >= secs);
                }
                Err(CostError::Invalid(e)) => {
                    prop_assert!(e.field == "distance" || e.field == "departure_time");
                }
            }
        }
    }
}
