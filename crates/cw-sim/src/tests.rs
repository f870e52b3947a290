//! Unit and scenario tests for cw-sim.
//!
//! All tests shrink the simulation second to a few milliseconds, so even the
//! horizon-bound scenarios finish in well under a second of wall time.
//! Safety and concurrency assertions read the `EventLog`, whose emission
//! order is a faithful linearization of grant/release order (greens are
//! logged after the grant, reds before the release).

use std::sync::Arc;
use std::time::Duration;

use cw_arbiter::ConflictTable;
use cw_core::{CarId, Lane, Side, SimConfig, Turn};
use cw_schedule::{Arrival, ArrivalSchedule};

use crate::{EventLog, LightEvent, SimBuilder, SimReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn lane(side: Side, turn: Turn) -> Lane {
    Lane::new(side, turn)
}

fn arrival(side: Side, turn: Turn, car: u32, at_secs: u64) -> Arrival {
    Arrival::new(lane(side, turn), CarId(car), at_secs)
}

fn fast_config(horizon_secs: u64, cross_secs: u64) -> SimConfig {
    SimConfig {
        horizon_secs,
        cross_secs,
        sim_second: Duration::from_millis(5),
    }
}

/// Build, run, and return the report plus the recorded events.
fn run_sim(
    config:   SimConfig,
    arrivals: Vec<Arrival>,
    table:    Option<ConflictTable>,
) -> (SimReport, Vec<LightEvent>) {
    let schedule = ArrivalSchedule::new(arrivals).unwrap();
    let events = Arc::new(EventLog::new());

    let mut builder = SimBuilder::new(config, schedule).observer(Arc::clone(&events) as _);
    if let Some(table) = table {
        builder = builder.conflicts(table);
    }
    let report = builder.build().unwrap().run().unwrap();
    (report, events.snapshot())
}

/// Scan the event sequence and panic if two conflicting lanes were ever
/// green at once — the system's safety invariant.
fn assert_safe(events: &[LightEvent], table: &ConflictTable) {
    let mut green: Vec<Lane> = Vec::new();
    for event in events {
        match *event {
            LightEvent::Green { lane, .. } => {
                for &other in &green {
                    assert!(
                        !table.conflicts(lane, other),
                        "{lane} turned green while conflicting {other} was green"
                    );
                }
                green.push(lane);
            }
            LightEvent::Red { lane, .. } => {
                green.retain(|&g| g != lane);
            }
        }
    }
}

/// Highest number of simultaneously green lanes over the event sequence.
fn max_concurrent_greens(events: &[LightEvent]) -> usize {
    let mut current = 0usize;
    let mut max = 0usize;
    for event in events {
        match event {
            LightEvent::Green { .. } => {
                current += 1;
                max = max.max(current);
            }
            LightEvent::Red { .. } => current -= 1,
        }
    }
    max
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn non_conflicting_arrivals_overlap() {
        // Scenario A: opposing straights, both at t=0, must cross in the
        // same window rather than one after the other.
        // A 10-simulation-second crossing gives a 50 ms wall window, wide
        // enough that thread scheduling noise cannot break the overlap.
        let (report, events) = run_sim(
            fast_config(60, 10),
            vec![
                arrival(Side::North, Turn::Straight, 0, 0),
                arrival(Side::South, Turn::Straight, 1, 0),
            ],
            None,
        );

        assert_eq!(report.total_crossed(), 2);
        assert!(max_concurrent_greens(&events) >= 2, "crossings did not overlap");

        // Both complete within one crossing duration (plus scheduling slack).
        for event in &events {
            if let LightEvent::Red { at_secs, .. } = event {
                assert!(*at_secs <= 12, "red at t={at_secs}, expected ~cross_secs");
            }
        }
    }

    #[test]
    fn conflicting_arrivals_serialize() {
        // Scenario B: perpendicular straights, both at t=0.  Exactly one may
        // be green at a time, so the second finishes no earlier than
        // 2 × cross_secs.
        let table = ConflictTable::standard();
        let (report, events) = run_sim(
            fast_config(60, 4),
            vec![
                arrival(Side::North, Turn::Straight, 0, 0),
                arrival(Side::East, Turn::Straight, 1, 0),
            ],
            None,
        );

        assert_eq!(report.total_crossed(), 2);
        assert_safe(&events, &table);
        assert_eq!(max_concurrent_greens(&events), 1);

        let last_red = events
            .iter()
            .filter_map(|e| match e {
                LightEvent::Red { at_secs, .. } => Some(*at_secs),
                _ => None,
            })
            .max()
            .unwrap();
        assert!(last_red >= 8, "serialized crossings ended at t={last_red}, expected >= 8");
    }

    #[test]
    fn unreachable_arrival_never_crosses() {
        // Scenario C: scheduled past the horizon.  The controller stops via
        // timeout without ever turning green.
        let (report, events) = run_sim(
            fast_config(5, 1),
            vec![arrival(Side::West, Turn::Left, 0, 10)],
            None,
        );

        assert_eq!(report.total_crossed(), 0);
        assert!(events.is_empty());
        for summary in &report.lanes {
            assert!(summary.crossed.is_empty());
            assert!(summary.stopped_at_secs >= 5);
        }
    }

    #[test]
    fn custom_conflict_table_is_honored() {
        // With a total-conflict relation even opposing straights serialize —
        // the one-car-at-a-time gate as a degenerate configuration.
        let table = ConflictTable::from_fn(|_, _| true).unwrap();
        let (report, events) = run_sim(
            fast_config(30, 2),
            vec![
                arrival(Side::North, Turn::Straight, 0, 0),
                arrival(Side::South, Turn::Straight, 1, 0),
            ],
            Some(table),
        );

        assert_eq!(report.total_crossed(), 2);
        assert_eq!(max_concurrent_greens(&events), 1);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;

    #[test]
    fn safety_invariant_under_contention() {
        // A burst of arrivals across mutually conflicting and compatible
        // lanes; the event log must never show conflicting greens together.
        let mut arrivals = Vec::new();
        let lanes = [
            (Side::North, Turn::Straight),
            (Side::East, Turn::Straight),
            (Side::South, Turn::Left),
            (Side::West, Turn::Right),
            (Side::North, Turn::UTurn),
        ];
        for (i, &(side, turn)) in lanes.iter().enumerate() {
            for round in 0..3u64 {
                arrivals.push(Arrival::new(
                    lane(side, turn),
                    CarId((round as u32) * 10 + i as u32),
                    round,
                ));
            }
        }
        arrivals.sort_by_key(|a| a.at_secs);

        let table = ConflictTable::standard();
        let (report, events) = run_sim(fast_config(120, 1), arrivals, None);

        assert_eq!(report.total_crossed(), 15);
        assert_safe(&events, &table);
    }

    #[test]
    fn per_lane_order_is_preserved() {
        let (report, _events) = run_sim(
            fast_config(60, 1),
            vec![
                arrival(Side::North, Turn::Straight, 0, 0),
                arrival(Side::North, Turn::Straight, 1, 0),
                arrival(Side::East, Turn::Left, 2, 1),
                arrival(Side::North, Turn::Straight, 3, 2),
            ],
            None,
        );

        assert_eq!(
            report.crossed_in(lane(Side::North, Turn::Straight)),
            &[CarId(0), CarId(1), CarId(3)]
        );
        assert_eq!(report.crossed_in(lane(Side::East, Turn::Left)), &[CarId(2)]);
    }

    #[test]
    fn generous_horizon_drains_every_arrival() {
        // Liveness: nothing is silently dropped when there is time for all.
        let schedule = ArrivalSchedule::random(24, 5, 99);
        let expected = schedule.len();

        let events = Arc::new(EventLog::new());
        let report = SimBuilder::new(fast_config(100, 1), schedule)
            .observer(Arc::clone(&events) as _)
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(report.total_crossed(), expected);
        // Every crossing produced its green/red pair.
        assert_eq!(events.len(), expected * 2);
    }

    #[test]
    fn green_and_red_events_pair_up_per_lane() {
        let (_report, events) = run_sim(
            fast_config(60, 1),
            vec![
                arrival(Side::South, Turn::Straight, 0, 0),
                arrival(Side::South, Turn::Straight, 1, 1),
            ],
            None,
        );

        let mut open: Option<Lane> = None;
        let mut pairs = 0;
        for event in events.iter().filter(|e| e.lane() == lane(Side::South, Turn::Straight)) {
            match event {
                LightEvent::Green { .. } => {
                    assert!(open.is_none(), "green while already green");
                    open = Some(event.lane());
                }
                LightEvent::Red { .. } => {
                    assert!(open.take().is_some(), "red without green");
                    pairs += 1;
                }
            }
        }
        assert_eq!(pairs, 2);
        assert!(open.is_none());
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn rejects_invalid_config() {
        let schedule = ArrivalSchedule::new(vec![]).unwrap();
        let mut config = fast_config(10, 1);
        config.cross_secs = 0;
        assert!(SimBuilder::new(config, schedule).build().is_err());
    }

    #[test]
    fn empty_schedule_runs_to_the_horizon() {
        let schedule = ArrivalSchedule::new(vec![]).unwrap();
        let report = SimBuilder::new(fast_config(3, 1), schedule)
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(report.total_crossed(), 0);
        assert_eq!(report.lanes.len(), cw_core::LANE_COUNT);
    }
}

// ── Event export ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod export {
    use crate::write_events_csv;

    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let events = vec![
            LightEvent::Green {
                lane:    lane(Side::North, Turn::Straight),
                car:     CarId(7),
                at_secs: 0,
            },
            LightEvent::Red { lane: lane(Side::North, Turn::Straight), at_secs: 2 },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        write_events_csv(&events, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "event,side,direction,car_id,at_secs");
        assert_eq!(lines[1], "green,0,1,7,0");
        assert_eq!(lines[2], "red,0,1,,2");
        assert_eq!(lines.len(), 3);
    }
}
