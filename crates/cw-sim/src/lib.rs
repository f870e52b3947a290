//! `cw-sim` — thread-per-lane simulation runner.
//!
//! # Thread topology
//!
//! ```text
//! arrival-feed ──────────► LaneQueues[lane]
//!                              │ wait_and_dequeue(horizon deadline)
//! lane-<side>-<turn> ×16 ──────┘
//!        │ request_crossing ── Arbiter (single decision point)
//!        │ hold cross_secs, emit green/red
//!        └ release_crossing, repeat until horizon
//! ```
//!
//! Seventeen threads run with true concurrency: sixteen controllers (one per
//! lane) and one feed.  All blocked waits observe the same horizon deadline,
//! so the whole system winds down together; the runner joins every thread
//! before returning its [`SimReport`].
//!
//! # Crate layout
//!
//! | Module         | Contents                                            |
//! |----------------|-----------------------------------------------------|
//! | [`builder`]    | `SimBuilder` — validated construction               |
//! | [`sim`]        | `Sim` — spawn/join runner                           |
//! | [`controller`] | `LaneController` — the per-lane state machine       |
//! | [`observer`]   | `CrossingObserver`, `EventLog`, `ConsoleObserver`   |
//! | [`output`]     | CSV event export                                    |
//! | [`report`]     | `SimReport`, `LaneSummary`                          |
//! | [`error`]      | `SimError`, `SimResult<T>`                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cw_core::SimConfig;
//! use cw_sim::{EventLog, SimBuilder};
//!
//! let log = Arc::new(EventLog::new());
//! let report = SimBuilder::new(config, schedule)
//!     .observer(Arc::clone(&log) as _)
//!     .build()?
//!     .run()?;
//! println!("{} cars crossed", report.total_crossed());
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod observer;
pub mod output;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{ConsoleObserver, CrossingObserver, EventLog, LightEvent, NoopObserver};
pub use output::write_events_csv;
pub use report::{LaneSummary, SimReport};
pub use sim::Sim;
