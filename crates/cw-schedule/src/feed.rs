//! The arrival feed — paced replay of a schedule into the lane queues.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use cw_core::SimClock;

use crate::{ArrivalSchedule, LaneQueues};

/// Replays an [`ArrivalSchedule`] against the clock.
///
/// For each arrival in list order: sleep until its scheduled second, then
/// enqueue it into its lane's queue.  Dispatch order equals list order, so
/// each lane receives its arrivals in scheduled-time order.
///
/// The feed does not observe the horizon — it terminates after the final
/// dispatch even if that lands beyond it.  Arrivals dispatched past the
/// horizon simply sit in their queues; the controllers are already stopping.
pub struct ArrivalFeed {
    schedule: ArrivalSchedule,
    queues:   Arc<LaneQueues>,
    clock:    SimClock,
}

impl ArrivalFeed {
    pub fn new(schedule: ArrivalSchedule, queues: Arc<LaneQueues>, clock: SimClock) -> ArrivalFeed {
        ArrivalFeed { schedule, queues, clock }
    }

    /// Dispatch the whole schedule, consuming the feed.
    pub fn run(self) {
        for arrival in self.schedule {
            self.clock.sleep_until(arrival.at_secs);
            log::debug!("dispatching {arrival}");
            self.queues.enqueue(arrival);
        }
        log::debug!("arrival feed finished");
    }

    /// Run on a dedicated named thread.  Spawn failure is a startup error
    /// surfaced to the caller.
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("arrival-feed".into())
            .spawn(move || self.run())
    }
}
