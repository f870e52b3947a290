//! Simulation time model.
//!
//! # Design
//!
//! Schedules, crossings, and the horizon are all expressed in whole
//! *simulation seconds*.  `SimClock` maps those to wall time through a
//! configurable `sim_second` duration:
//!
//!   wall_instant(t) = start + t * sim_second
//!
//! The default is 1 s of wall time per simulation second, matching real-time
//! replay.  Tests shrink `sim_second` to a few milliseconds and exercise the
//! identical pacing, wait, and timeout paths at full speed — the rest of the
//! system is agnostic to the scale.
//!
//! Elapsed time reads from a monotonic [`Instant`], so the clock never goes
//! backwards and never fails once started.

use std::thread;
use std::time::{Duration, Instant};

use crate::{CoreError, CoreResult};

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic elapsed-time source with a fixed simulation horizon.
///
/// Cheap to clone; every thread of the simulation carries its own copy and
/// all copies agree on `start`.
#[derive(Copy, Clone, Debug)]
pub struct SimClock {
    start:        Instant,
    sim_second:   Duration,
    horizon_secs: u64,
}

impl SimClock {
    /// Start the clock now.  `sim_second` must be non-zero (validated by
    /// [`SimConfig::validate`] before any clock is built).
    pub fn start(horizon_secs: u64, sim_second: Duration) -> SimClock {
        SimClock {
            start: Instant::now(),
            sim_second,
            horizon_secs,
        }
    }

    /// Whole simulation seconds elapsed since start (rounds down).
    pub fn elapsed_secs(&self) -> u64 {
        (self.start.elapsed().as_nanos() / self.sim_second.as_nanos()) as u64
    }

    /// The fixed end time of the simulation, in simulation seconds.
    #[inline]
    pub fn horizon_secs(&self) -> u64 {
        self.horizon_secs
    }

    #[inline]
    pub fn past_horizon(&self) -> bool {
        self.elapsed_secs() >= self.horizon_secs
    }

    /// The wall instant at which simulation second `secs` begins.
    #[inline]
    pub fn instant_of(&self, secs: u64) -> Instant {
        // Saturates far beyond any usable horizon; u32 ceiling is fine.
        self.start + self.sim_second.saturating_mul(secs.min(u32::MAX as u64) as u32)
    }

    /// The wall instant of the horizon — the uniform deadline every blocked
    /// wait in the system observes.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.instant_of(self.horizon_secs)
    }

    /// Block the calling thread until simulation second `secs`.
    ///
    /// Returns immediately if that moment has already passed.  Coarse-grained:
    /// the feed paces arrival dispatch with this, and sub-second precision is
    /// not required.
    pub fn sleep_until(&self, secs: u64) {
        let target = self.instant_of(secs);
        let now = Instant::now();
        if target > now {
            thread::sleep(target - now);
        }
    }

    /// Block for `secs` simulation seconds from now.
    pub fn sleep_for(&self, secs: u64) {
        thread::sleep(self.sim_second.saturating_mul(secs.min(u32::MAX as u64) as u32));
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Simulation seconds after start at which every controller stops
    /// waiting, unconditionally.
    pub horizon_secs: u64,

    /// Simulation seconds one grant is held — the fixed crossing duration.
    pub cross_secs: u64,

    /// Wall duration of one simulation second.  1 s replays in real time;
    /// tests use a few milliseconds.
    pub sim_second: Duration,
}

impl SimConfig {
    /// Real-time configuration: 1 simulation second = 1 wall second.
    pub fn realtime(horizon_secs: u64, cross_secs: u64) -> SimConfig {
        SimConfig {
            horizon_secs,
            cross_secs,
            sim_second: Duration::from_secs(1),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.horizon_secs == 0 {
            return Err(CoreError::Config("horizon_secs must be at least 1".into()));
        }
        if self.cross_secs == 0 {
            return Err(CoreError::Config("cross_secs must be at least 1".into()));
        }
        if self.sim_second.is_zero() {
            return Err(CoreError::Config("sim_second must be non-zero".into()));
        }
        Ok(())
    }

    /// Start a [`SimClock`] for this run.  Call once, at simulation start.
    pub fn make_clock(&self) -> SimClock {
        SimClock::start(self.horizon_secs, self.sim_second)
    }
}
