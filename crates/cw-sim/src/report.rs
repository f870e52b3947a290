//! End-of-run summary data.

use std::time::Duration;

use cw_core::{CarId, Lane};

/// What one lane's controller did before stopping.
#[derive(Clone, Debug)]
pub struct LaneSummary {
    pub lane: Lane,
    /// Cars that completed a crossing, in crossing order — equal to the
    /// lane's enqueue order (FIFO).
    pub crossed: Vec<CarId>,
    /// Simulation second at which the controller reached `stopped`.
    pub stopped_at_secs: u64,
}

/// Aggregated results of one simulation run, one entry per lane in dense
/// lane-index order.
#[derive(Clone, Debug)]
pub struct SimReport {
    pub lanes: Vec<LaneSummary>,
    /// Wall time the run took, including thread wind-down.
    pub wall_elapsed: Duration,
}

impl SimReport {
    /// Cars crossed on `lane`, in order.
    pub fn crossed_in(&self, lane: Lane) -> &[CarId] {
        &self.lanes[lane.index()].crossed
    }

    /// Total crossings across all lanes.
    pub fn total_crossed(&self) -> usize {
        self.lanes.iter().map(|l| l.crossed.len()).sum()
    }
}
