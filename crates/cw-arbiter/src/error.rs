use cw_core::Lane;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArbiterError {
    /// A conflict matrix claimed `conflicts(a, b) != conflicts(b, a)`.
    #[error("conflict table is asymmetric between {a} and {b}")]
    Asymmetric { a: Lane, b: Lane },

    /// A conflict matrix claimed a lane does not conflict with itself.
    #[error("conflict table is missing the self-conflict of {lane}")]
    NotReflexive { lane: Lane },

    /// A second crossing request arrived for a lane that is already waiting
    /// or crossing.  Each lane has exactly one controller; this is a
    /// protocol defect, not a condition to wait out.
    #[error("lane {lane} already has an active crossing request")]
    LaneBusy { lane: Lane },

    /// A grant was released for a lane that is not crossing — a double
    /// release or a forged grant.  Detected and rejected rather than
    /// silently corrupting the state table.
    #[error("release for {lane} does not match a held crossing")]
    GrantNotHeld { lane: Lane },
}

pub type ArbiterResult<T> = Result<T, ArbiterError>;
