//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per arrival, ascending by `arrival_secs`.  `side` and `direction`
//! use the numeric encoding of the lane model (sides clockwise from north,
//! directions 0 = left, 1 = straight, 2 = right, 3 = u-turn).
//!
//! ```csv
//! side,direction,car_id,arrival_secs
//! 0,1,0,0
//! 2,1,1,0
//! 1,0,2,3
//! ```
//!
//! Out-of-order rows are rejected — the feed relies on list order for lane
//! FIFO delivery.  Pre-sort the file (or build via
//! [`ArrivalSchedule::from_unsorted`]) if the source cannot guarantee order.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cw_core::{CarId, Lane, Side, Turn};

use crate::{Arrival, ArrivalSchedule, ScheduleError, ScheduleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ArrivalRecord {
    side:         u8,
    direction:    u8,
    car_id:       u32,
    arrival_secs: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an [`ArrivalSchedule`] from a CSV file.
pub fn load_schedule_csv(path: &Path) -> ScheduleResult<ArrivalSchedule> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_schedule_reader(file)
}

/// Like [`load_schedule_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded schedules.
pub fn load_schedule_reader<R: Read>(reader: R) -> ScheduleResult<ArrivalSchedule> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut arrivals = Vec::new();

    for (row, result) in csv_reader.deserialize::<ArrivalRecord>().enumerate() {
        let record = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;

        let side = Side::from_index(record.side).ok_or_else(|| {
            ScheduleError::Parse(format!("row {row}: invalid side {} (expected 0..4)", record.side))
        })?;
        let turn = Turn::from_index(record.direction).ok_or_else(|| {
            ScheduleError::Parse(format!(
                "row {row}: invalid direction {} (expected 0..4)",
                record.direction
            ))
        })?;

        arrivals.push(Arrival::new(
            Lane::new(side, turn),
            CarId(record.car_id),
            record.arrival_secs,
        ));
    }

    ArrivalSchedule::new(arrivals)
}
