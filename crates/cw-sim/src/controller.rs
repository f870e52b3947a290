//! The per-lane controller.
//!
//! # State machine
//!
//! ```text
//!        ┌──────────────────────────────────────────────┐
//!        ▼                                              │
//!  waiting_for_arrival ──► requesting_rights ──► crossing
//!        │                        │
//!        │ horizon timeout        │ horizon timeout
//!        ▼                        ▼
//!     stopped ◄───────────────────┘
//! ```
//!
//! Each iteration: pop the next arrival (FIFO), request rights, hold the
//! intersection for exactly `cross_secs`, release, repeat.  A crossing in
//! progress is never preempted — the horizon only interrupts the two
//! waiting states.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use cw_arbiter::Arbiter;
use cw_core::{Lane, SimClock};
use cw_schedule::LaneQueues;

use crate::observer::CrossingObserver;
use crate::report::LaneSummary;
use crate::SimResult;

pub(crate) struct LaneController {
    lane:       Lane,
    queues:     Arc<LaneQueues>,
    arbiter:    Arc<Arbiter>,
    clock:      SimClock,
    cross_secs: u64,
    observer:   Arc<dyn CrossingObserver>,
}

impl LaneController {
    pub(crate) fn new(
        lane:       Lane,
        queues:     Arc<LaneQueues>,
        arbiter:    Arc<Arbiter>,
        clock:      SimClock,
        cross_secs: u64,
        observer:   Arc<dyn CrossingObserver>,
    ) -> LaneController {
        LaneController { lane, queues, arbiter, clock, cross_secs, observer }
    }

    /// Serve the lane until the horizon, returning what crossed.
    pub(crate) fn run(self) -> SimResult<LaneSummary> {
        let deadline = self.clock.deadline();
        let mut crossed = Vec::new();

        loop {
            // waiting_for_arrival
            let Some(arrival) = self.queues.get(self.lane).wait_and_dequeue(deadline) else {
                break;
            };

            // requesting_rights — blocks until grant or horizon.
            let outcome =
                self.arbiter.request_crossing(self.lane, arrival.car, arrival.at_secs)?;
            let Some(grant) = outcome else {
                break;
            };

            // crossing — hold for the fixed duration, never preempted.
            self.observer.light_green(self.lane, arrival.car, self.clock.elapsed_secs());
            self.clock.sleep_for(self.cross_secs);
            self.observer.light_red(self.lane, self.clock.elapsed_secs());
            self.arbiter.release_crossing(grant)?;

            crossed.push(arrival.car);
        }

        // stopped
        let stopped_at_secs = self.clock.elapsed_secs();
        self.observer.lane_stopped(self.lane, stopped_at_secs);
        log::debug!("lane {} stopped at t={} after {} crossings", self.lane, stopped_at_secs, crossed.len());

        Ok(LaneSummary { lane: self.lane, crossed, stopped_at_secs })
    }

    /// Run on a dedicated named thread (`lane-N-straight`, `lane-E-left`, …).
    pub(crate) fn spawn(self) -> io::Result<JoinHandle<SimResult<LaneSummary>>> {
        thread::Builder::new()
            .name(format!("lane-{}-{}", self.lane.side, self.lane.turn))
            .spawn(move || self.run())
    }
}
