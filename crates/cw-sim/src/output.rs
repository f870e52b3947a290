//! CSV event export.
//!
//! Writes one row per light change in emission order:
//!
//! ```csv
//! event,side,direction,car_id,at_secs
//! green,0,1,0,0
//! red,0,1,,2
//! ```
//!
//! `car_id` is empty on `red` rows — the green/red pairing per lane carries
//! the association.

use std::path::Path;

use csv::Writer;

use crate::observer::LightEvent;
use crate::SimResult;

/// Write `events` to a CSV file at `path`, creating or truncating it.
pub fn write_events_csv(events: &[LightEvent], path: &Path) -> SimResult<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(["event", "side", "direction", "car_id", "at_secs"])?;

    for event in events {
        match *event {
            LightEvent::Green { lane, car, at_secs } => writer.write_record(&[
                "green".to_string(),
                lane.side.index().to_string(),
                lane.turn.index().to_string(),
                car.0.to_string(),
                at_secs.to_string(),
            ])?,
            LightEvent::Red { lane, at_secs } => writer.write_record(&[
                "red".to_string(),
                lane.side.index().to_string(),
                lane.turn.index().to_string(),
                String::new(),
                at_secs.to_string(),
            ])?,
        }
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
