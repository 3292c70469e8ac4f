//! Per-step metrics for the steering loop.
//!
//! [`StepMetrics`] captures what one step touched and how long it took.

use trellis_core::StepId;

/// Counts and timings collected during a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default)]
pub struct StepMetrics {
    /// The step these metrics describe.
    pub step: StepId,
    /// Distinct identifiers looked up during the step.
    pub accessed: usize,
    /// Modules handed to the updater.
    pub modules_updated: usize,
    /// Dirty identifiers that belong to no module and were not dispatched.
    pub unscoped_dirty: usize,
    /// Per-steppable execution times: `(name, microseconds)`.
    /// Steppables skipped by their frequency are absent.
    pub steppable_us: Vec<(String, u64)>,
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
}
