//! fourway — demo run of the crossway intersection simulator.
//!
//! Replays a small hand-written arrival schedule through the four-way
//! crossing in accelerated time (1 simulation second = 100 ms of wall time),
//! printing every light change and writing the event log to CSV.  Pass
//! `--random` to generate a seeded random schedule instead.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use cw_core::{Lane, SimConfig};
use cw_schedule::{ArrivalSchedule, load_schedule_reader};
use cw_sim::{CrossingObserver, EventLog, SimBuilder, write_events_csv};

// ── Constants ─────────────────────────────────────────────────────────────────

const HORIZON_SECS: u64 = 30;
const CROSS_SECS:   u64 = 2;
const SIM_SECOND:   Duration = Duration::from_millis(100); // 10× real time

const RANDOM_CARS:  u32 = 40;
const RANDOM_SEED:  u64 = 42;

// ── Schedule CSV ──────────────────────────────────────────────────────────────

// Sides clockwise from north (0..4), directions 0 = left, 1 = straight,
// 2 = right, 3 = u-turn.  Rows ascending by arrival_secs.
//
// t=0 pairs opposing straights (they overlap), t=4 adds a left against an
// oncoming straight (they serialize), t=8 fans right turns across all four
// sides (all overlap), t=12 finishes with a u-turn (blocks everything).
const SCHEDULE_CSV: &str = "\
side,direction,car_id,arrival_secs\n\
0,1,0,0\n\
2,1,1,0\n\
0,0,2,4\n\
2,1,3,4\n\
0,2,4,8\n\
1,2,5,8\n\
2,2,6,8\n\
3,2,7,8\n\
1,3,8,12\n\
";

// ── Console + log tee ─────────────────────────────────────────────────────────

/// Prints every light change and records it for the CSV export.
struct TeeObserver {
    console: cw_sim::ConsoleObserver,
    log:     Arc<EventLog>,
}

impl CrossingObserver for TeeObserver {
    fn light_green(&self, lane: Lane, car: cw_core::CarId, at_secs: u64) {
        self.console.light_green(lane, car, at_secs);
        self.log.light_green(lane, car, at_secs);
    }

    fn light_red(&self, lane: Lane, at_secs: u64) {
        self.console.light_red(lane, at_secs);
        self.log.light_red(lane, at_secs);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let random = std::env::args().any(|arg| arg == "--random");

    println!("=== fourway — crossway intersection simulator ===");
    println!(
        "Horizon: {HORIZON_SECS}s  |  Crossing: {CROSS_SECS}s  |  1 sim second = {:?}",
        SIM_SECOND
    );
    println!();

    // 1. Load or generate the schedule.
    let schedule: ArrivalSchedule = if random {
        println!("Schedule: {RANDOM_CARS} random arrivals (seed {RANDOM_SEED})");
        ArrivalSchedule::random(RANDOM_CARS, HORIZON_SECS / 2, RANDOM_SEED)
    } else {
        println!("Schedule: embedded demo schedule");
        load_schedule_reader(Cursor::new(SCHEDULE_CSV))?
    };
    println!("Loaded {} arrivals", schedule.len());
    println!();

    // 2. Sim config.
    let config = SimConfig {
        horizon_secs: HORIZON_SECS,
        cross_secs:   CROSS_SECS,
        sim_second:   SIM_SECOND,
    };

    // 3. Observer: console lines + in-memory log for export.
    let events = Arc::new(EventLog::new());
    let observer = TeeObserver {
        console: cw_sim::ConsoleObserver,
        log:     Arc::clone(&events),
    };

    // 4. Build and run.
    let report = SimBuilder::new(config, schedule)
        .observer(Arc::new(observer) as _)
        .build()?
        .run()?;

    // 5. Export the event log.
    std::fs::create_dir_all("output/fourway")?;
    let csv_path = Path::new("output/fourway/events.csv");
    write_events_csv(&events.snapshot(), csv_path)?;

    // 6. Summary.
    println!();
    println!(
        "Simulation complete: {} crossings in {:.2} s wall time",
        report.total_crossed(),
        report.wall_elapsed.as_secs_f64()
    );
    println!("Event log: {} ({} events)", csv_path.display(), events.len());
    println!();

    println!("{:<12} {:<10} {:<8}", "Lane", "Crossed", "Stopped");
    println!("{}", "-".repeat(32));
    for summary in &report.lanes {
        if summary.crossed.is_empty() {
            continue;
        }
        println!(
            "{:<12} {:<10} t={}",
            summary.lane.to_string(),
            summary.crossed.len(),
            summary.stopped_at_secs
        );
    }

    Ok(())
}
