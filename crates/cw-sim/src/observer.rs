//! Crossing event observers.
//!
//! Observers are a pure output sink: nothing they do feeds back into
//! scheduling decisions.  Callbacks take `&self` and implementations must be
//! `Send + Sync` because all sixteen controllers emit through one shared
//! observer.

use std::sync::{Mutex, PoisonError};

use cw_core::{CarId, Lane};

// ── Observer trait ────────────────────────────────────────────────────────────

/// Callbacks invoked by lane controllers at crossing boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait CrossingObserver: Send + Sync {
    /// The lane received its grant and its light turns green.
    fn light_green(&self, _lane: Lane, _car: CarId, _at_secs: u64) {}

    /// The crossing completed and the light turns red (just before release).
    fn light_red(&self, _lane: Lane, _at_secs: u64) {}

    /// The lane's controller reached the horizon and stopped.
    fn lane_stopped(&self, _lane: Lane, _at_secs: u64) {}
}

/// A [`CrossingObserver`] that does nothing.
pub struct NoopObserver;

impl CrossingObserver for NoopObserver {}

// ── ConsoleObserver ───────────────────────────────────────────────────────────

/// Prints one line per light change, in the classic numeric format:
///
/// ```text
/// traffic light 0 1 turns green at time 3 for car 7
/// traffic light 0 1 turns red at time 5
/// ```
pub struct ConsoleObserver;

impl CrossingObserver for ConsoleObserver {
    fn light_green(&self, lane: Lane, car: CarId, at_secs: u64) {
        println!(
            "traffic light {} {} turns green at time {} for car {}",
            lane.side.index(),
            lane.turn.index(),
            at_secs,
            car.0
        );
    }

    fn light_red(&self, lane: Lane, at_secs: u64) {
        println!(
            "traffic light {} {} turns red at time {}",
            lane.side.index(),
            lane.turn.index(),
            at_secs
        );
    }
}

// ── EventLog ──────────────────────────────────────────────────────────────────

/// One recorded light change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightEvent {
    Green { lane: Lane, car: CarId, at_secs: u64 },
    Red { lane: Lane, at_secs: u64 },
}

impl LightEvent {
    pub fn lane(&self) -> Lane {
        match *self {
            LightEvent::Green { lane, .. } | LightEvent::Red { lane, .. } => lane,
        }
    }
}

/// Ordered in-memory event log.
///
/// The interleaving recorded here is a faithful linearization of the grant
/// and release order: controllers emit `Green` after receiving their grant
/// and `Red` before releasing, so a conflicting grant cannot be logged
/// between a lane's `Green` and `Red`.  Tests and the CSV exporter both
/// consume this.
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<LightEvent>>,
}

impl EventLog {
    pub fn new() -> EventLog {
        EventLog::default()
    }

    /// Copy of all events recorded so far, in emission order.
    pub fn snapshot(&self) -> Vec<LightEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, event: LightEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl CrossingObserver for EventLog {
    fn light_green(&self, lane: Lane, car: CarId, at_secs: u64) {
        self.push(LightEvent::Green { lane, car, at_secs });
    }

    fn light_red(&self, lane: Lane, at_secs: u64) {
        self.push(LightEvent::Red { lane, at_secs });
    }
}
