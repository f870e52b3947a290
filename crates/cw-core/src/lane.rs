//! Entry sides, turn movements, and the 16-lane model.
//!
//! # Lane model
//!
//! The intersection has four entry sides, numbered clockwise, and four
//! relative movements a vehicle can make from each side.  A lane is one
//! `(Side, Turn)` pair — one queue of vehicles waiting to execute one
//! movement — giving 4 × 4 = 16 lanes, all fixed at startup.
//!
//! A vehicle entering on side `s` with turn `d` leaves the intersection on
//! side `(s + d + 1) mod 4`; a U-turn leaves on `s` itself.  With sides
//! numbered clockwise this maps turn 0 to the left exit, 1 to straight
//! across, and 2 to the right exit.
//!
//! Lanes index densely into `0..16` (`side * 4 + turn`), so per-lane state
//! lives in plain fixed-size arrays rather than maps.

use std::fmt;

/// Number of lanes through the intersection (4 sides × 4 turns).
pub const LANE_COUNT: usize = 16;

// ── Side ──────────────────────────────────────────────────────────────────────

/// One of the four entry sides, numbered clockwise.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Side {
    North = 0,
    East  = 1,
    South = 2,
    West  = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    /// Parse a numeric side `0..4` as it appears in schedule files.
    pub fn from_index(i: u8) -> Option<Side> {
        Self::ALL.get(i as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The side `n` positions clockwise from `self`.
    #[inline]
    pub fn rotate(self, n: u8) -> Side {
        Self::ALL[(self.index() + n as usize) % 4]
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Side::North => 'N',
            Side::East  => 'E',
            Side::South => 'S',
            Side::West  => 'W',
        };
        write!(f, "{c}")
    }
}

// ── Turn ──────────────────────────────────────────────────────────────────────

/// The relative movement a vehicle makes through the intersection.
///
/// Numeric values match the schedule-file encoding: the exit side of a
/// vehicle entering side `s` with turn `d` is `(s + d + 1) mod 4`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Turn {
    Left     = 0,
    Straight = 1,
    Right    = 2,
    UTurn    = 3,
}

impl Turn {
    pub const ALL: [Turn; 4] = [Turn::Left, Turn::Straight, Turn::Right, Turn::UTurn];

    /// Parse a numeric turn `0..4` as it appears in schedule files.
    pub fn from_index(i: u8) -> Option<Turn> {
        Self::ALL.get(i as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Turn::Left     => "left",
            Turn::Straight => "straight",
            Turn::Right    => "right",
            Turn::UTurn    => "u-turn",
        };
        write!(f, "{s}")
    }
}

// ── Lane ──────────────────────────────────────────────────────────────────────

/// One `(side, turn)` entry path into the intersection.
///
/// `Copy` and 2 bytes wide — pass by value everywhere.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Lane {
    pub side: Side,
    pub turn: Turn,
}

impl Lane {
    pub fn new(side: Side, turn: Turn) -> Lane {
        Lane { side, turn }
    }

    /// Dense index in `0..LANE_COUNT` for direct array access.
    #[inline]
    pub fn index(self) -> usize {
        self.side.index() * 4 + self.turn.index()
    }

    /// Inverse of [`Lane::index`].
    pub fn from_index(i: usize) -> Option<Lane> {
        if i >= LANE_COUNT {
            return None;
        }
        Some(Lane {
            side: Side::ALL[i / 4],
            turn: Turn::ALL[i % 4],
        })
    }

    /// All 16 lanes in dense-index order.
    pub fn all() -> impl Iterator<Item = Lane> {
        Side::ALL
            .into_iter()
            .flat_map(|side| Turn::ALL.into_iter().map(move |turn| Lane { side, turn }))
    }

    /// The side on which a vehicle using this lane leaves the intersection.
    #[inline]
    pub fn exit_side(self) -> Side {
        self.side.rotate(self.turn.index() as u8 + 1)
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.side, self.turn)
    }
}

// ── CarId ─────────────────────────────────────────────────────────────────────

/// Unique identifier of one scheduled vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct CarId(pub u32);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car {}", self.0)
    }
}
