//! The validated arrival schedule.
//!
//! The whole design downstream relies on one precondition: arrivals are
//! sorted ascending by `at_secs`.  The feed then dispatches in list order,
//! which makes every per-lane queue FIFO in scheduled time for free.
//! `ArrivalSchedule` is the single place that precondition is established —
//! construction either checks it ([`ArrivalSchedule::new`]) or enforces it
//! ([`ArrivalSchedule::from_unsorted`]), and the list is immutable afterward.

use cw_core::{CarId, Lane, Side, SimRng, Turn};

use crate::{Arrival, ScheduleError, ScheduleResult};

/// A finite, time-ordered list of arrivals.
#[derive(Clone, Debug)]
pub struct ArrivalSchedule {
    arrivals: Vec<Arrival>,
}

impl ArrivalSchedule {
    /// Wrap an already-ordered list, rejecting out-of-order input with
    /// [`ScheduleError::OutOfOrder`].
    pub fn new(arrivals: Vec<Arrival>) -> ScheduleResult<ArrivalSchedule> {
        for (index, pair) in arrivals.windows(2).enumerate() {
            if pair[1].at_secs < pair[0].at_secs {
                return Err(ScheduleError::OutOfOrder {
                    index:     index + 1,
                    at_secs:   pair[1].at_secs,
                    prev_secs: pair[0].at_secs,
                });
            }
        }
        Ok(ArrivalSchedule { arrivals })
    }

    /// Sort defensively, then wrap.  The sort is stable, so arrivals sharing
    /// a timestamp keep their input order (and therefore their per-lane
    /// order).
    pub fn from_unsorted(mut arrivals: Vec<Arrival>) -> ArrivalSchedule {
        arrivals.sort_by_key(|a| a.at_secs);
        ArrivalSchedule { arrivals }
    }

    /// Generate `count` random arrivals uniformly over lanes and over
    /// `0..=latest_secs`, deterministically from `seed`.
    ///
    /// Car IDs are assigned `0..count` in arrival order, matching the
    /// hand-written schedule convention.
    pub fn random(count: u32, latest_secs: u64, seed: u64) -> ArrivalSchedule {
        let mut rng = SimRng::new(seed);
        let mut times: Vec<u64> = (0..count)
            .map(|_| rng.gen_range(0..=latest_secs))
            .collect();
        times.sort_unstable();

        let arrivals = times
            .into_iter()
            .enumerate()
            .map(|(i, at_secs)| {
                let side = Side::ALL[rng.gen_range(0..Side::ALL.len())];
                let turn = Turn::ALL[rng.gen_range(0..Turn::ALL.len())];
                Arrival::new(Lane::new(side, turn), CarId(i as u32), at_secs)
            })
            .collect();
        ArrivalSchedule { arrivals }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arrival> {
        self.arrivals.iter()
    }

    pub fn as_slice(&self) -> &[Arrival] {
        &self.arrivals
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    /// Scheduled time of the final arrival, or `None` if empty.
    pub fn last_secs(&self) -> Option<u64> {
        self.arrivals.last().map(|a| a.at_secs)
    }
}

impl IntoIterator for ArrivalSchedule {
    type Item = Arrival;
    type IntoIter = std::vec::IntoIter<Arrival>;

    fn into_iter(self) -> Self::IntoIter {
        self.arrivals.into_iter()
    }
}
