use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The input violates the ascending-time precondition.  Rejected rather
    /// than silently reordered; callers that want leniency use
    /// [`ArrivalSchedule::from_unsorted`][crate::ArrivalSchedule::from_unsorted].
    #[error("arrival {index} is out of order: t={at_secs} after t={prev_secs}")]
    OutOfOrder {
        index:     usize,
        at_secs:   u64,
        prev_secs: u64,
    },

    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
