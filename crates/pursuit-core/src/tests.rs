//! Unit tests for pursuit-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
    }

    #[test]
    fn invalid_sentinel_is_max_and_default() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod alert {
    use crate::{AlertState, SensorConfig};

    #[test]
    fn thresholds_are_inclusive() {
        let cfg = SensorConfig::default();
        assert_eq!(AlertState::from_awareness(0.0, &cfg), AlertState::Idle);
        assert_eq!(AlertState::from_awareness(24.99, &cfg), AlertState::Idle);
        assert_eq!(AlertState::from_awareness(25.0, &cfg), AlertState::Curious);
        assert_eq!(AlertState::from_awareness(60.0, &cfg), AlertState::Suspect);
        assert_eq!(AlertState::from_awareness(99.9, &cfg), AlertState::Suspect);
        assert_eq!(AlertState::from_awareness(100.0, &cfg), AlertState::Hostile);
    }

    #[test]
    fn ordered_by_severity() {
        assert!(AlertState::Idle < AlertState::Curious);
        assert!(AlertState::Suspect < AlertState::Hostile);
        assert_eq!(AlertState::default(), AlertState::Idle);
        assert_eq!(AlertState::Hostile.to_string(), "hostile");
    }
}

#[cfg(test)]
mod geo {
    use crate::geo::{angle_between_deg, horizontal, horizontal_direction, lateral_axis};
    use crate::Vec3;

    #[test]
    fn horizontal_drops_height() {
        assert_eq!(horizontal(Vec3::new(1.0, 5.0, -2.0)), Vec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn lateral_axis_is_perpendicular_and_flat() {
        let fwd = Vec3::new(3.0, 1.0, 4.0);
        let lat = lateral_axis(fwd);
        assert!((lat.length() - 1.0).abs() < 1e-5);
        assert!(lat.dot(horizontal(fwd)).abs() < 1e-5);
        assert_eq!(lat.y, 0.0);
    }

    #[test]
    fn lateral_axis_of_vertical_falls_back_to_x() {
        assert_eq!(lateral_axis(Vec3::Y), Vec3::X);
        assert_eq!(lateral_axis(Vec3::ZERO), Vec3::X);
    }

    #[test]
    fn horizontal_direction_of_stationary_is_none() {
        assert!(horizontal_direction(Vec3::new(0.0, 3.0, 0.0)).is_none());
        let d = horizontal_direction(Vec3::new(0.0, 3.0, 2.0)).unwrap();
        assert!((d - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn angles() {
        assert!(angle_between_deg(Vec3::X, Vec3::X).abs() < 1e-3);
        assert!((angle_between_deg(Vec3::X, Vec3::Z) - 90.0).abs() < 1e-3);
        assert!((angle_between_deg(Vec3::X, -Vec3::X) - 180.0).abs() < 1e-3);
        assert_eq!(angle_between_deg(Vec3::ZERO, Vec3::X), 0.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn clock_now_and_context() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.now_secs(), 0.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.now_secs(), 1.0);
        let ctx = clock.context();
        assert_eq!(ctx.tick, Tick(2));
        assert_eq!(ctx.now, 1.0);
        assert_eq!(ctx.dt, 0.5);
    }

    #[test]
    fn ticks_for_duration_rounds_up() {
        let clock = SimClock::new(0.25);
        assert_eq!(clock.ticks_for_secs(30.0), 120);
        assert_eq!(clock.ticks_for_secs(0.1), 1);
    }

    #[test]
    fn sim_config_end_tick() {
        let cfg = SimConfig { total_ticks: 600, ..SimConfig::default() };
        assert_eq!(cfg.end_tick(), Tick(600));
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, SimConfig};

    #[test]
    fn defaults_are_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn default_constants() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.sensor.curious_threshold, 25.0);
        assert_eq!(cfg.sensor.suspect_threshold, 60.0);
        assert_eq!(cfg.sensor.hostile_threshold, 100.0);
        assert_eq!(cfg.hearing.wall_attenuation, 0.4);
        assert_eq!(cfg.wanted.no_los_decay_secs, 30.0);
    }

    #[test]
    fn rejects_non_positive_tick() {
        let cfg = SimConfig { tick_duration_secs: 0.0, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_unordered_thresholds() {
        let mut cfg = SimConfig::default();
        cfg.sensor.suspect_threshold = 20.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_fov_wider_than_peripheral() {
        let mut cfg = SimConfig::default();
        cfg.vision.fov_degrees = 170.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_hearing_samples() {
        let mut cfg = SimConfig::default();
        cfg.hearing.samples = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_amplifying_walls() {
        let mut cfg = SimConfig::default();
        cfg.hearing.wall_attenuation = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: SimConfig =
            serde_json::from_str(r#"{ "seed": 7, "radio": { "range": 20.0 } }"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.radio.range, 20.0);
        assert_eq!(cfg.vision, crate::VisionConfig::default());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = AgentRng::new(0, AgentId(0));
        for _ in 0..1000 {
            let v = rng.gen_range(-1.0f32..1.0);
            assert!((-1.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes_and_clamping() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(7.0));
        assert!(!rng.gen_bool(-1.0));
    }

    #[test]
    fn children_are_reproducible() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        let mut ca = a.child(1);
        let mut cb = b.child(1);
        let x: u64 = ca.random();
        let y: u64 = cb.random();
        assert_eq!(x, y);
    }
}
