//! Unit tests for cw-core.

use std::time::Duration;

use crate::{CoreError, LANE_COUNT, Lane, Side, SimConfig, SimRng, Turn};

// ── Lane model ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lane {
    use super::*;

    #[test]
    fn dense_index_roundtrip() {
        for lane in Lane::all() {
            assert_eq!(Lane::from_index(lane.index()), Some(lane));
        }
        assert_eq!(Lane::from_index(LANE_COUNT), None);
    }

    #[test]
    fn all_covers_sixteen_distinct_lanes() {
        let lanes: Vec<Lane> = Lane::all().collect();
        assert_eq!(lanes.len(), LANE_COUNT);
        for (i, lane) in lanes.iter().enumerate() {
            assert_eq!(lane.index(), i);
        }
    }

    #[test]
    fn side_and_turn_parse_schedule_encoding() {
        assert_eq!(Side::from_index(0), Some(Side::North));
        assert_eq!(Side::from_index(3), Some(Side::West));
        assert_eq!(Side::from_index(4), None);
        assert_eq!(Turn::from_index(1), Some(Turn::Straight));
        assert_eq!(Turn::from_index(4), None);
    }

    #[test]
    fn exit_side_follows_turn_rule() {
        // From North: left exits East, straight exits South, right exits
        // West, u-turn exits North.
        let n = |t| Lane::new(Side::North, t).exit_side();
        assert_eq!(n(Turn::Left), Side::East);
        assert_eq!(n(Turn::Straight), Side::South);
        assert_eq!(n(Turn::Right), Side::West);
        assert_eq!(n(Turn::UTurn), Side::North);

        // Wraps around the clockwise numbering.
        assert_eq!(Lane::new(Side::West, Turn::Left).exit_side(), Side::North);
        assert_eq!(Lane::new(Side::South, Turn::Straight).exit_side(), Side::North);
    }
}

// ── SimClock / SimConfig ──────────────────────────────────────────────────────

#[cfg(test)]
mod time {
    use super::*;

    fn fast_config(horizon: u64) -> SimConfig {
        SimConfig {
            horizon_secs: horizon,
            cross_secs:   1,
            sim_second:   Duration::from_millis(5),
        }
    }

    #[test]
    fn elapsed_advances_with_wall_time() {
        let clock = fast_config(100).make_clock();
        assert_eq!(clock.elapsed_secs(), 0);
        clock.sleep_until(3);
        assert!(clock.elapsed_secs() >= 3);
        assert!(!clock.past_horizon());
    }

    #[test]
    fn sleep_until_past_moment_returns_immediately() {
        let clock = fast_config(100).make_clock();
        clock.sleep_until(2);
        let before = std::time::Instant::now();
        clock.sleep_until(1); // already passed
        assert!(before.elapsed() < Duration::from_millis(5));
    }

    #[test]
    fn deadline_matches_horizon() {
        let clock = fast_config(10).make_clock();
        assert_eq!(clock.deadline(), clock.instant_of(10));
        assert_eq!(clock.horizon_secs(), 10);
    }

    #[test]
    fn validate_rejects_zero_fields() {
        let ok = fast_config(5);
        assert!(ok.validate().is_ok());

        let mut bad = fast_config(5);
        bad.horizon_secs = 0;
        assert!(matches!(bad.validate(), Err(CoreError::Config(_))));

        let mut bad = fast_config(5);
        bad.cross_secs = 0;
        assert!(bad.validate().is_err());

        let mut bad = fast_config(5);
        bad.sim_second = Duration::ZERO;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn realtime_config_uses_one_second_ticks() {
        let config = SimConfig::realtime(60, 5);
        assert_eq!(config.sim_second, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rng {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..1000u32), b.gen_range(0..1000u32));
        }
    }

    #[test]
    fn children_diverge_from_parent() {
        let mut root = SimRng::new(7);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        let s0: Vec<u32> = (0..8).map(|_| c0.gen_range(0..u32::MAX)).collect();
        let s1: Vec<u32> = (0..8).map(|_| c1.gen_range(0..u32::MAX)).collect();
        assert_ne!(s0, s1);
    }
}
