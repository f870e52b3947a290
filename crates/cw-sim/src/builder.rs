//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use cw_arbiter::ConflictTable;
use cw_core::SimConfig;
use cw_schedule::ArrivalSchedule;

use crate::observer::{CrossingObserver, NoopObserver};
use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — horizon, crossing duration, wall pacing
/// - [`ArrivalSchedule`] — the validated, time-ordered input
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                   |
/// |-----------------|---------------------------|
/// | `.conflicts(t)` | `ConflictTable::standard()` |
/// | `.observer(o)`  | `NoopObserver`            |
///
/// # Example
///
/// ```rust,ignore
/// let report = SimBuilder::new(config, schedule)
///     .observer(Arc::new(ConsoleObserver) as _)
///     .build()?
///     .run()?;
/// ```
pub struct SimBuilder {
    config:   SimConfig,
    schedule: ArrivalSchedule,
    table:    Option<ConflictTable>,
    observer: Option<Arc<dyn CrossingObserver>>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, schedule: ArrivalSchedule) -> SimBuilder {
        SimBuilder {
            config,
            schedule,
            table: None,
            observer: None,
        }
    }

    /// Supply a custom conflict relation.
    ///
    /// If not called, the standard quadrant-derived table is used.  The
    /// relation only affects the degree of parallelism; safety is the
    /// arbiter's job either way.
    pub fn conflicts(mut self, table: ConflictTable) -> SimBuilder {
        self.table = Some(table);
        self
    }

    /// Supply the event observer shared by all controllers.
    pub fn observer(mut self, observer: Arc<dyn CrossingObserver>) -> SimBuilder {
        self.observer = Some(observer);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        Ok(Sim {
            config:   self.config,
            schedule: self.schedule,
            table:    self.table.unwrap_or_default(),
            observer: self.observer.unwrap_or_else(|| Arc::new(NoopObserver)),
        })
    }
}
