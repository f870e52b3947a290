//! `cw-arbiter` — conflict model and crossing-rights arbitration.
//!
//! # The problem
//!
//! Sixteen lanes feed one intersection.  Lanes whose paths never touch may
//! cross simultaneously; lanes whose paths intersect must never hold the
//! intersection at the same time.  The arbiter grants and revokes crossing
//! rights so that the second rule holds continuously while allowing as much
//! of the first as the geometry permits.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`conflict`] | `ConflictTable` — the static lane-pair relation       |
//! | [`arbiter`]  | `Arbiter`, `Grant` — the grant/release protocol       |
//! | [`error`]    | `ArbiterError`, `ArbiterResult<T>`                    |
//!
//! # Safety property
//!
//! At any instant, no two lanes `a`, `b` with `conflicts(a, b)` are both in
//! the `Crossing` state.  Every transition into `Crossing` happens under the
//! arbiter's single mutex, after checking the full current state, so the
//! property holds continuously — not just at grant instants.

pub mod arbiter;
pub mod conflict;
pub mod error;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arbiter::{Arbiter, Grant};
pub use conflict::ConflictTable;
pub use error::{ArbiterError, ArbiterResult};
