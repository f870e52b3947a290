//! The crossing-rights arbiter.
//!
//! # Single decision point
//!
//! All 16 lanes' states live in one mutex-guarded table with one condvar.
//! A requesting controller takes the lock, registers itself as waiting, and
//! sleeps until it can move to `Crossing` without standing next to a
//! conflicting crosser.  Because every grant decision reads the *entire*
//! current table under the one lock — there are no per-lane locks to acquire
//! in any order — no circular wait over multiple held resources can form.
//!
//! This replaces a whole-intersection mutex, which would satisfy the safety
//! property by serializing all 16 lanes into a one-car gate.  Here
//! non-conflicting lanes are granted independently and overlap freely.
//!
//! # Fairness
//!
//! Waiting lanes carry a `(scheduled_secs, ticket)` priority: a lane may not
//! enter `Crossing` while a *conflicting* lane waits with an earlier
//! priority.  `scheduled_secs` is the arrival's timestamp (earlier arrivals
//! win); the ticket is a monotonic sequence number that breaks exact-time
//! ties deterministically.  The globally smallest priority among waiters is
//! always eligible once its conflicting crossers release, so every waiter's
//! delay is bounded by the crossings of its earlier-priority conflictors.
//!
//! # Horizon
//!
//! Blocked requests observe the clock's deadline uniformly: once the horizon
//! passes (or [`Arbiter::shutdown`] is called) a pending request returns
//! `None` instead of a grant.  That is the normal end-of-simulation path,
//! not an error.

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Instant;

use cw_core::{CarId, LANE_COUNT, Lane, SimClock};

use crate::{ArbiterError, ArbiterResult, ConflictTable};

// ── Grant ─────────────────────────────────────────────────────────────────────

/// Exclusive, time-bounded permission for one lane to occupy the
/// intersection.
///
/// Move-only and not cloneable: the holding controller consumes it in
/// [`Arbiter::release_crossing`], so rights cannot be returned twice from
/// the same grant.
#[derive(Debug)]
pub struct Grant {
    pub(crate) lane: Lane,
    pub(crate) car:  CarId,
}

impl Grant {
    #[inline]
    pub fn lane(&self) -> Lane {
        self.lane
    }

    #[inline]
    pub fn car(&self) -> CarId {
        self.car
    }
}

// ── Lane state ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LaneState {
    Idle,
    Waiting { at_secs: u64, ticket: u64 },
    Crossing,
}

struct ArbiterState {
    lanes:       [LaneState; LANE_COUNT],
    next_ticket: u64,
    shutdown:    bool,
}

// ── Arbiter ───────────────────────────────────────────────────────────────────

/// Grants each lane exclusive crossing rights with respect to its conflict
/// set while letting disjoint lanes cross concurrently.
pub struct Arbiter {
    table:   ConflictTable,
    clock:   SimClock,
    state:   Mutex<ArbiterState>,
    changed: Condvar,
}

impl Arbiter {
    pub fn new(table: ConflictTable, clock: SimClock) -> Arbiter {
        Arbiter {
            table,
            clock,
            state: Mutex::new(ArbiterState {
                lanes:       [LaneState::Idle; LANE_COUNT],
                next_ticket: 0,
                shutdown:    false,
            }),
            changed: Condvar::new(),
        }
    }

    /// Block until `lane` may cross, or until the horizon passes.
    ///
    /// `scheduled_secs` is the arrival's timestamp, used for the fairness
    /// tie-break among simultaneously waiting conflicting lanes.
    ///
    /// Returns `Ok(None)` on horizon/shutdown — the caller's signal to stop.
    /// A request for a lane that is already waiting or crossing is a
    /// protocol defect ([`ArbiterError::LaneBusy`]).
    pub fn request_crossing(
        &self,
        lane:           Lane,
        car:            CarId,
        scheduled_secs: u64,
    ) -> ArbiterResult<Option<Grant>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if state.lanes[lane.index()] != LaneState::Idle {
            return Err(ArbiterError::LaneBusy { lane });
        }
        let ticket = state.next_ticket;
        state.next_ticket += 1;
        state.lanes[lane.index()] = LaneState::Waiting { at_secs: scheduled_secs, ticket };

        let deadline = self.clock.deadline();
        loop {
            // The horizon outranks eligibility: a request pending at the
            // deadline unblocks empty-handed regardless of conflict state.
            let now = Instant::now();
            if state.shutdown || now >= deadline {
                // Leaving the waiting set can unblock a later-priority
                // conflictor, so wake the others before returning.
                state.lanes[lane.index()] = LaneState::Idle;
                drop(state);
                self.changed.notify_all();
                log::debug!("request for {lane} timed out at the horizon");
                return Ok(None);
            }

            if self.eligible(&state, lane, (scheduled_secs, ticket)) {
                state.lanes[lane.index()] = LaneState::Crossing;
                debug_assert!(self.crossings_disjoint(&state));
                drop(state);
                log::debug!("granted crossing of {lane} to {car}");
                return Ok(Some(Grant { lane, car }));
            }

            let (guard, _timed_out) = self
                .changed
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
        }
    }

    /// Return crossing rights, transitioning the lane back to idle and
    /// waking every blocked conflictor.
    ///
    /// Consumes the grant.  Releasing a grant whose lane is not crossing is
    /// a detected defect, never silently absorbed.
    pub fn release_crossing(&self, grant: Grant) -> ArbiterResult<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if state.lanes[grant.lane.index()] != LaneState::Crossing {
            return Err(ArbiterError::GrantNotHeld { lane: grant.lane });
        }
        state.lanes[grant.lane.index()] = LaneState::Idle;
        drop(state);
        self.changed.notify_all();
        log::debug!("released crossing of {} held for {}", grant.lane, grant.car);
        Ok(())
    }

    /// Unblock every pending request immediately, regardless of the horizon.
    pub fn shutdown(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.shutdown = true;
        drop(state);
        self.changed.notify_all();
    }

    /// Lanes currently holding crossing rights (diagnostics).
    pub fn crossing_lanes(&self) -> Vec<Lane> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Lane::all()
            .filter(|lane| state.lanes[lane.index()] == LaneState::Crossing)
            .collect()
    }

    /// A lane may cross iff every conflicting lane is neither crossing nor
    /// waiting with an earlier `(scheduled_secs, ticket)` priority.
    fn eligible(&self, state: &ArbiterState, lane: Lane, priority: (u64, u64)) -> bool {
        for other in Lane::all() {
            if other == lane || !self.table.conflicts(lane, other) {
                continue;
            }
            match state.lanes[other.index()] {
                LaneState::Crossing => return false,
                LaneState::Waiting { at_secs, ticket } if (at_secs, ticket) < priority => {
                    return false;
                }
                _ => {}
            }
        }
        true
    }

    /// The safety invariant, checked after every grant in debug builds.
    fn crossings_disjoint(&self, state: &ArbiterState) -> bool {
        let crossing: Vec<Lane> = Lane::all()
            .filter(|lane| state.lanes[lane.index()] == LaneState::Crossing)
            .collect();
        for (i, &a) in crossing.iter().enumerate() {
            for &b in &crossing[i + 1..] {
                if self.table.conflicts(a, b) {
                    return false;
                }
            }
        }
        true
    }
}
