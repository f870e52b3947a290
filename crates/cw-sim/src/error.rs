use cw_arbiter::ArbiterError;
use cw_core::{CoreError, Lane};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    /// A thread failed to start.  Fatal before any crossing occurs; already
    /// running threads wind down at the horizon.
    #[error("failed to start {what} thread: {source}")]
    Startup {
        what:   &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("controller thread for lane {lane} panicked")]
    ControllerPanicked { lane: Lane },

    #[error("arrival feed thread panicked")]
    FeedPanicked,

    #[error("arbitration error: {0}")]
    Arbiter(#[from] ArbiterError),

    #[error("event export error: {0}")]
    Output(#[from] csv::Error),
}

pub type SimResult<T> = Result<T, SimError>;
