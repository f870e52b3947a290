//! `cw-schedule` — arrival schedules, per-lane queues, and the arrival feed.
//!
//! # Crate layout
//!
//! | Module       | Contents                                           |
//! |--------------|----------------------------------------------------|
//! | [`arrival`]  | `Arrival` — one scheduled vehicle                  |
//! | [`schedule`] | `ArrivalSchedule` — validated, time-ordered input  |
//! | [`loader`]   | `load_schedule_csv`, `load_schedule_reader`        |
//! | [`queue`]    | `LaneQueue`, `LaneQueues` — pending-arrival FIFOs  |
//! | [`feed`]     | `ArrivalFeed` — paced dispatch producer thread     |
//! | [`error`]    | `ScheduleError`, `ScheduleResult<T>`               |
//!
//! # Flow (summary)
//!
//! ```text
//! CSV / generator → ArrivalSchedule (ascending at_secs, checked once)
//!                 → ArrivalFeed::run  (sleeps until each at_secs)
//!                 → LaneQueues[lane].enqueue  (never blocks, signals)
//!                 → one controller per lane: wait_and_dequeue(deadline)
//! ```
//!
//! Because the feed dispatches in global time order, every lane receives its
//! arrivals in time order too — the per-lane FIFO the controllers rely on.

pub mod arrival;
pub mod error;
pub mod feed;
pub mod loader;
pub mod queue;
pub mod schedule;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arrival::Arrival;
pub use error::{ScheduleError, ScheduleResult};
pub use feed::ArrivalFeed;
pub use loader::{load_schedule_csv, load_schedule_reader};
pub use queue::{LaneQueue, LaneQueues};
pub use schedule::ArrivalSchedule;
