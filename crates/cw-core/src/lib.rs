//! `cw-core` — foundational types for the `crossway` intersection simulator.
//!
//! This crate is a dependency of every other `cw-*` crate.  It intentionally
//! has no `cw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`).
//!
//! # What lives here
//!
//! | Module    | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | [`lane`]  | `Side`, `Turn`, `Lane`, `CarId`, `LANE_COUNT`   |
//! | [`time`]  | `SimClock`, `SimConfig`                         |
//! | [`rng`]   | `SimRng` (deterministic schedule generation)    |
//! | [`error`] | `CoreError`, `CoreResult`                       |

pub mod error;
pub mod lane;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use lane::{CarId, LANE_COUNT, Lane, Side, Turn};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig};
