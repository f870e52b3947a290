//! The `Sim` struct and its spawn/join run loop.

use std::sync::Arc;
use std::time::Instant;

use cw_arbiter::{Arbiter, ConflictTable};
use cw_core::{LANE_COUNT, Lane, SimConfig};
use cw_schedule::{ArrivalFeed, ArrivalSchedule, LaneQueues};

use crate::controller::LaneController;
use crate::observer::CrossingObserver;
use crate::report::SimReport;
use crate::{SimError, SimResult};

/// One configured simulation run.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  `run` consumes the sim:
/// the clock starts when `run` is called, not at construction.
pub struct Sim {
    pub(crate) config:   SimConfig,
    pub(crate) schedule: ArrivalSchedule,
    pub(crate) table:    ConflictTable,
    pub(crate) observer: Arc<dyn CrossingObserver>,
}

impl Sim {
    /// Execute the simulation to the horizon and join every thread.
    ///
    /// Spawns one controller per lane plus the arrival feed.  If any spawn
    /// fails the run aborts with [`SimError::Startup`]; threads already
    /// started wind down at the horizon on their own.
    pub fn run(self) -> SimResult<SimReport> {
        let t0 = Instant::now();
        log::info!(
            "starting simulation: {} arrivals, horizon {}s, crossing {}s",
            self.schedule.len(),
            self.config.horizon_secs,
            self.config.cross_secs
        );

        let clock = self.config.make_clock();
        let queues = Arc::new(LaneQueues::new());
        let arbiter = Arc::new(Arbiter::new(self.table, clock));

        // ── Spawn one controller per lane ─────────────────────────────────
        let mut handles = Vec::with_capacity(LANE_COUNT);
        for lane in Lane::all() {
            let controller = LaneController::new(
                lane,
                Arc::clone(&queues),
                Arc::clone(&arbiter),
                clock,
                self.config.cross_secs,
                Arc::clone(&self.observer),
            );
            let handle = controller
                .spawn()
                .map_err(|source| SimError::Startup { what: "lane controller", source })?;
            handles.push((lane, handle));
        }

        // ── Spawn the arrival feed ────────────────────────────────────────
        let feed = ArrivalFeed::new(self.schedule, Arc::clone(&queues), clock)
            .spawn()
            .map_err(|source| SimError::Startup { what: "arrival feed", source })?;

        // ── Join everything ───────────────────────────────────────────────
        let mut lanes = Vec::with_capacity(LANE_COUNT);
        for (lane, handle) in handles {
            match handle.join() {
                Ok(summary) => lanes.push(summary?),
                Err(_) => return Err(SimError::ControllerPanicked { lane }),
            }
        }
        feed.join().map_err(|_| SimError::FeedPanicked)?;

        let report = SimReport { lanes, wall_elapsed: t0.elapsed() };
        log::info!(
            "simulation finished: {} crossings in {:.3}s wall time",
            report.total_crossed(),
            report.wall_elapsed.as_secs_f64()
        );
        Ok(report)
    }
}
