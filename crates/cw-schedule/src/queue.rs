//! Per-lane pending-arrival queues.
//!
//! # Why this shape
//!
//! Each lane is a single-producer (the feed) / single-consumer (that lane's
//! controller) channel with one twist: the consumer's wait is bounded by the
//! simulation horizon, after which it must wake empty-handed and stop.  A
//! `Mutex<VecDeque>` paired with a `Condvar` covers exactly that: `enqueue`
//! appends and signals without ever blocking, `wait_and_dequeue` sleeps until
//! an arrival is available or the deadline passes.  The queue length is the
//! wake count — an arrival is signalled by its presence, so nothing can be
//! signalled twice or lost between the push and the wakeup.
//!
//! Queues grow on demand; there is no fixed per-lane capacity.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Instant;

use cw_core::{LANE_COUNT, Lane};

use crate::Arrival;

// ── LaneQueue ─────────────────────────────────────────────────────────────────

/// FIFO of arrivals not yet crossed, for one lane.
#[derive(Default)]
pub struct LaneQueue {
    pending:   Mutex<VecDeque<Arrival>>,
    available: Condvar,
}

impl LaneQueue {
    pub fn new() -> LaneQueue {
        LaneQueue::default()
    }

    /// Append to the tail and wake the consumer.  Never blocks.
    pub fn enqueue(&self, arrival: Arrival) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        pending.push_back(arrival);
        drop(pending);
        self.available.notify_one();
    }

    /// Block until an arrival is available or `deadline` passes, whichever
    /// comes first.
    ///
    /// Returns `None` on deadline — the normal termination signal for the
    /// consumer, not an error.  Exactly one consumer may call this per queue.
    pub fn wait_and_dequeue(&self, deadline: Instant) -> Option<Arrival> {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        while pending.is_empty() {
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let (guard, _timed_out) = self
                .available
                .wait_timeout(pending, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            pending = guard;
            // Loop re-checks emptiness: a timeout with an arrival already
            // queued still delivers it.
        }

        pending.pop_front()
    }

    /// Arrivals queued but not yet consumed.
    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── LaneQueues ────────────────────────────────────────────────────────────────

/// All 16 lane queues, indexed by [`Lane`].
///
/// Shared as one `Arc<LaneQueues>` between the feed (producer side) and the
/// 16 controllers (each consuming only its own lane's queue).
#[derive(Default)]
pub struct LaneQueues {
    queues: [LaneQueue; LANE_COUNT],
}

impl LaneQueues {
    pub fn new() -> LaneQueues {
        LaneQueues::default()
    }

    #[inline]
    pub fn get(&self, lane: Lane) -> &LaneQueue {
        &self.queues[lane.index()]
    }

    /// Route an arrival to its lane's queue.
    pub fn enqueue(&self, arrival: Arrival) {
        self.get(arrival.lane).enqueue(arrival);
    }

    /// Total arrivals pending across all lanes.
    pub fn pending_total(&self) -> usize {
        self.queues.iter().map(LaneQueue::len).sum()
    }
}
