//! Unit tests for fleet-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DeliveryId, VehicleId};

    #[test]
    fn parse_bare_number() {
        assert_eq!("7".parse::<VehicleId>().unwrap(), VehicleId(7));
        assert_eq!(" 12 ".parse::<DeliveryId>().unwrap(), DeliveryId(12));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("truck-7".parse::<VehicleId>().is_err());
        assert!("".parse::<VehicleId>().is_err());
    }

    #[test]
    fn ordering() {
        assert!(VehicleId(1) < VehicleId(2));
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(40.4168, -3.7038);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(40.0, -3.0);
        let b = GeoPoint::new(41.0, -3.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 200.0, "got {d}");
    }

    #[test]
    fn lerp_midpoint() {
        let a = GeoPoint::new(40.0, -3.0);
        let b = GeoPoint::new(41.0, -4.0);
        assert_eq!(a.lerp(b, 0.5), GeoPoint::new(40.5, -3.5));
    }

    #[test]
    fn array_conversions() {
        let p: GeoPoint = [1.5, -2.5].into();
        assert_eq!(p, GeoPoint::new(1.5, -2.5));
        let back: [f64; 2] = p.into();
        assert_eq!(back, [1.5, -2.5]);
    }
}

#[cfg(test)]
mod route {
    use crate::{GeoPoint, Route, RouteError, interpolate};

    fn three_point() -> Route {
        Route::new(vec![
            GeoPoint::new(40.0, -3.0),
            GeoPoint::new(41.0, -4.0),
            GeoPoint::new(42.0, -5.0),
        ])
        .unwrap()
    }

    /// The Madrid → Toledo delivery route from the sample dataset.
    fn toledo() -> Route {
        Route::new(vec![
            GeoPoint::new(40.4168, -3.7038),
            GeoPoint::new(40.3600, -3.7100),
            GeoPoint::new(40.3000, -3.8000),
            GeoPoint::new(40.2500, -3.9000),
            GeoPoint::new(39.8628, -4.0273),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_short_routes() {
        assert_eq!(Route::new(vec![]), Err(RouteError::TooFewWaypoints(0)));
        assert_eq!(
            Route::new(vec![GeoPoint::new(1.0, 1.0)]),
            Err(RouteError::TooFewWaypoints(1))
        );
    }

    #[test]
    fn rejects_non_finite() {
        let r = Route::new(vec![GeoPoint::new(1.0, 1.0), GeoPoint::new(f64::NAN, 0.0)]);
        assert_eq!(r, Err(RouteError::NonFinite { index: 1 }));
    }

    #[test]
    fn endpoints_are_exact() {
        for route in [three_point(), toledo()] {
            assert_eq!(interpolate(&route, 0.0), route.first());
            assert_eq!(interpolate(&route, 1.0), route.last());
        }
    }

    #[test]
    fn quarter_and_three_quarter_points() {
        let r = three_point();
        assert_eq!(interpolate(&r, 0.25), GeoPoint::new(40.5, -3.5));
        assert_eq!(interpolate(&r, 0.75), GeoPoint::new(41.5, -4.5));
    }

    #[test]
    fn interior_waypoint_hit_at_segment_boundary() {
        let r = three_point();
        assert_eq!(interpolate(&r, 0.5), GeoPoint::new(41.0, -4.0));
    }

    #[test]
    fn two_point_route_is_plain_lerp() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(12.0, 16.0);
        let r = Route::new(vec![a, b]).unwrap();
        assert_eq!(interpolate(&r, 0.25), GeoPoint::new(10.5, 19.0));
        assert_eq!(r.segment_at(1.0), 0);
    }

    #[test]
    fn segment_clamps_at_completion() {
        let r = toledo();
        assert_eq!(r.segment_at(1.0), 3);
        assert_eq!(r.locate(1.0), (3, 1.0));
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let r = toledo();
        assert_eq!(interpolate(&r, -0.5), r.first());
        assert_eq!(interpolate(&r, 7.0), r.last());
        assert_eq!(interpolate(&r, f64::NAN), r.first());
    }

    #[test]
    fn segment_index_is_monotonic() {
        let r = toledo();
        let mut last = 0;
        for i in 0..=1_000 {
            let seg = r.segment_at(i as f64 / 1_000.0);
            assert!(seg >= last, "segment went backwards at step {i}");
            assert!(seg <= r.len() - 2);
            last = seg;
        }
    }

    #[test]
    fn length_is_sum_of_segments() {
        let r = three_point();
        let expected = r.points()[0].distance_m(r.points()[1])
            + r.points()[1].distance_m(r.points()[2]);
        assert!((r.length_m() - expected).abs() < 1e-6);
    }
}

#[cfg(test)]
mod time {
    use crate::{Progress, SimConfig, SpeedMultiplier};

    #[test]
    fn default_config_is_valid() {
        let c = SimConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.tick_interval().as_millis(), 100);
    }

    #[test]
    fn invalid_configs_rejected() {
        let zero_interval = SimConfig { tick_interval_ms: 0, ..SimConfig::default() };
        assert!(zero_interval.validate().is_err());
        let bad_step = SimConfig { base_step: 0.0, ..SimConfig::default() };
        assert!(bad_step.validate().is_err());
        let nan_step = SimConfig { base_step: f64::NAN, ..SimConfig::default() };
        assert!(nan_step.validate().is_err());
    }

    #[test]
    fn slowest_speed_still_scales_the_step() {
        let c = SimConfig { base_step: SimConfig::MIN_BASE_STEP, ..SimConfig::default() };
        assert!(c.validate().is_ok());
        let slowest = SpeedMultiplier::new(SpeedMultiplier::MIN).unwrap();
        assert_eq!(c.step_units(slowest), 1);
        assert_eq!(c.step_units(SpeedMultiplier::new(0.002).unwrap()), 2);

        let finer = SimConfig { base_step: 1e-7, ..SimConfig::default() };
        assert!(finer.validate().is_err());
    }

    #[test]
    fn step_units_per_preset() {
        let c = SimConfig::default();
        assert_eq!(c.step_units(SpeedMultiplier::SLOW),      2_500_000);
        assert_eq!(c.step_units(SpeedMultiplier::NORMAL),    5_000_000);
        assert_eq!(c.step_units(SpeedMultiplier::FAST),     10_000_000);
        assert_eq!(c.step_units(SpeedMultiplier::VERY_FAST), 20_000_000);
    }

    #[test]
    fn ticks_to_complete() {
        let c = SimConfig::default();
        assert_eq!(c.ticks_to_complete(SpeedMultiplier::NORMAL), 200);
        assert_eq!(c.ticks_to_complete(SpeedMultiplier::FAST), 100);
        assert_eq!(c.ticks_to_complete(SpeedMultiplier::new(3.0).unwrap()), 67);
    }

    #[test]
    fn hundred_fast_steps_reach_exactly_one() {
        let c = SimConfig::default();
        let step = c.step_units(SpeedMultiplier::FAST);
        let mut p = Progress::ZERO;
        for _ in 0..99 {
            p = p.advance(step);
            assert!(!p.is_complete());
        }
        p = p.advance(step);
        assert!(p.is_complete());
        assert_eq!(p.fraction(), 1.0);
    }

    #[test]
    fn advance_clamps() {
        let p = Progress::from_fraction(0.99).advance(Progress::SCALE);
        assert_eq!(p, Progress::COMPLETE);
    }

    #[test]
    fn from_fraction_round_trips_simple_values() {
        assert_eq!(Progress::from_fraction(0.25).fraction(), 0.25);
        assert_eq!(Progress::from_fraction(-1.0), Progress::ZERO);
        assert_eq!(Progress::from_fraction(2.0), Progress::COMPLETE);
        assert_eq!(Progress::from_fraction(f64::NAN), Progress::ZERO);
    }

    #[test]
    fn percent_label() {
        assert_eq!(Progress::from_fraction(0.425).percent(), 43);
        assert_eq!(Progress::COMPLETE.to_string(), "100%");
    }
}

#[cfg(test)]
mod speed {
    use crate::SpeedMultiplier;

    #[test]
    fn rejects_non_positive_and_non_finite() {
        assert!(SpeedMultiplier::new(0.0).is_err());
        assert!(SpeedMultiplier::new(-1.0).is_err());
        assert!(SpeedMultiplier::new(f64::NAN).is_err());
        assert!(SpeedMultiplier::new(f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_below_minimum() {
        assert!(SpeedMultiplier::new(1e-300).is_err());
        assert!(SpeedMultiplier::new(0.000_9).is_err());
        assert!(SpeedMultiplier::new(SpeedMultiplier::MIN).is_ok());
    }

    #[test]
    fn presets_ascending() {
        let p = SpeedMultiplier::PRESETS;
        assert!(p.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(SpeedMultiplier::default(), SpeedMultiplier::NORMAL);
    }

    #[test]
    fn labels() {
        assert_eq!(SpeedMultiplier::SLOW.label(), "slow");
        assert_eq!(SpeedMultiplier::VERY_FAST.label(), "very fast");
        assert_eq!(SpeedMultiplier::FAST.to_string(), "2x");
    }
}
