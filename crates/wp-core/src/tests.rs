//! Unit tests for wp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, EdgeId, WaypointId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(WaypointId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::default(), EdgeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(WaypointId(7).to_string(), "WaypointId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point2;

    #[test]
    fn distance_is_euclidean() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn zero_distance() {
        let p = Point2::new(-50.0, 80.0);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn vector_ops() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, 6.0);
        assert_eq!(b - a, Point2::new(3.0, 4.0));
        assert_eq!((b - a) * 2.0, Point2::new(6.0, 8.0));
        assert_eq!((b - a) / 5.0, Point2::new(0.6, 0.8));
        let mut c = a;
        c += Point2::new(0.5, 0.5);
        assert_eq!(c, Point2::new(1.5, 2.5));
        assert_eq!(a + b, Point2::from((5.0, 8.0)));
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(Point2::new(10.0, 0.126).to_string(), "(10.00, 0.13)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn clock_advances_and_stamps() {
        let mut clock = SimClock::new(1_700_000_000, 50);
        assert_eq!(clock.stamp().tick, Tick::ZERO);
        assert_eq!(clock.stamp().unix_secs, 1_700_000_000.0);

        assert_eq!(clock.advance(), Tick(1));
        assert_eq!(clock.advance(), Tick(2));
        let s = clock.stamp();
        assert_eq!(s.tick, Tick(2));
        assert!((s.unix_secs - 1_700_000_000.1).abs() < 1e-6);
    }

    #[test]
    fn default_config_matches_animation_budget() {
        let c = SimConfig::default();
        assert_eq!(c.max_ticks, 1_000);
        assert_eq!(c.tick_duration_ms, 50);
        assert_eq!(c.last_tick(), Tick(1_000));
        assert_eq!(c.make_clock().current_tick, Tick::ZERO);
    }

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(3) + 2, Tick(5));
        assert_eq!(Tick(3).offset(4), Tick(7));
        assert_eq!(Tick(9).to_string(), "T9");
    }
}
