//! The `Arrival` record.

use std::fmt;

use cw_core::{CarId, Lane};

/// One scheduled vehicle: which lane it enters, who it is, and when.
///
/// Immutable after creation.  Owned by the feed until enqueued, then by the
/// lane's queue until its controller consumes it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Arrival {
    /// Entry lane `(side, turn)`.
    pub lane: Lane,
    /// Unique vehicle identifier.
    pub car: CarId,
    /// Scheduled arrival time in simulation seconds from start.
    pub at_secs: u64,
}

impl Arrival {
    pub fn new(lane: Lane, car: CarId, at_secs: u64) -> Arrival {
        Arrival { lane, car, at_secs }
    }
}

impl fmt::Display for Arrival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} (t={})", self.car, self.lane, self.at_secs)
    }
}
