//! The static conflict relation over the 16 lanes.
//!
//! # Geometry of the standard table
//!
//! The intersection box is split into four quadrants, numbered by the corner
//! they occupy (quadrant `q` sits between side `q` and side `q + 1`,
//! clockwise):
//!
//! ```text
//!            North (0)
//!          ┌─────┬─────┐
//!          │ NW 3│ NE 0│
//! West (3) ├─────┼─────┤ East (1)
//!          │ SW 2│ SE 1│
//!          └─────┴─────┘
//!            South (2)
//! ```
//!
//! Under right-hand traffic a vehicle entering from side `s` starts in the
//! quadrant on its right, `(s + 3) mod 4`, and sweeps counterclockwise until
//! the quadrant adjacent to its exit side.  A right turn therefore occupies
//! one quadrant, straight two, left three, and a U-turn all four.  Two lanes
//! conflict exactly when their swept quadrant sets overlap.
//!
//! The derived relation is symmetric by construction and reflexive because a
//! path always overlaps itself.  It reproduces the expected behavior: all
//! four right turns are mutually compatible, opposing straights pass each
//! other, a left turn blocks the oncoming straight, and a U-turn blocks
//! everything.
//!
//! The table is plain data — 16 bitmask rows — built once at startup and
//! read-only afterward.  Any alternative relation (via [`ConflictTable::from_fn`]
//! or [`ConflictTable::from_matrix`]) changes only the degree of parallelism,
//! never the arbiter's safety guarantee.

use cw_core::{LANE_COUNT, Lane};

use crate::{ArbiterError, ArbiterResult};

/// Symmetric, reflexive-true boolean relation over the 16 lanes.
///
/// Row `i` holds one bit per lane: bit `j` set means lane `i` and lane `j`
/// must not cross simultaneously.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictTable {
    rows: [u16; LANE_COUNT],
}

impl ConflictTable {
    /// The quadrant-occupancy table for a right-hand-traffic four-way
    /// crossing (see module docs).
    pub fn standard() -> ConflictTable {
        let mut rows = [0u16; LANE_COUNT];
        for a in Lane::all() {
            for b in Lane::all() {
                if path_quadrants(a) & path_quadrants(b) != 0 {
                    rows[a.index()] |= 1 << b.index();
                }
            }
        }
        ConflictTable { rows }
    }

    /// Build from an arbitrary predicate, validating symmetry and
    /// reflexivity.
    pub fn from_fn(conflicts: impl Fn(Lane, Lane) -> bool) -> ArbiterResult<ConflictTable> {
        let mut rows = [0u16; LANE_COUNT];
        for a in Lane::all() {
            for b in Lane::all() {
                if conflicts(a, b) {
                    rows[a.index()] |= 1 << b.index();
                }
            }
        }
        let table = ConflictTable { rows };
        table.validate()?;
        Ok(table)
    }

    /// Build from an explicit 16×16 matrix, validating symmetry and
    /// reflexivity.
    pub fn from_matrix(matrix: [[bool; LANE_COUNT]; LANE_COUNT]) -> ArbiterResult<ConflictTable> {
        Self::from_fn(|a, b| matrix[a.index()][b.index()])
    }

    /// `true` iff simultaneous crossing of `a` and `b` is unsafe.
    #[inline]
    pub fn conflicts(&self, a: Lane, b: Lane) -> bool {
        self.rows[a.index()] & (1 << b.index()) != 0
    }

    /// All lanes conflicting with `lane` (including `lane` itself).
    pub fn conflict_set(&self, lane: Lane) -> impl Iterator<Item = Lane> + '_ {
        Lane::all().filter(move |&other| self.conflicts(lane, other))
    }

    fn validate(&self) -> ArbiterResult<()> {
        for a in Lane::all() {
            if !self.conflicts(a, a) {
                return Err(ArbiterError::NotReflexive { lane: a });
            }
            for b in Lane::all() {
                if self.conflicts(a, b) != self.conflicts(b, a) {
                    return Err(ArbiterError::Asymmetric { a, b });
                }
            }
        }
        Ok(())
    }
}

impl Default for ConflictTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ── Quadrant sweep ────────────────────────────────────────────────────────────

/// Bitmask of the quadrants a lane's path occupies.
fn path_quadrants(lane: Lane) -> u8 {
    let entry = (lane.side.index() + 3) % 4;
    let exit = lane.exit_side().index();
    // Counterclockwise distance from entry to exit quadrant, inclusive:
    // right = 1 quadrant, straight = 2, left = 3, u-turn = 4.
    let steps = (entry + 4 - exit) % 4 + 1;

    let mut mask = 0u8;
    let mut q = entry;
    for _ in 0..steps {
        mask |= 1 << q;
        q = (q + 3) % 4;
    }
    mask
}
