//! Single-threaded steering loop.
//!
//! [`SteeringLoop`] is the owner of the access ledger's lifecycle: every
//! boundary it runs (start, each step, finish) ends with exactly one
//! [`reset()`](trellis_index::IndexLookupService::reset), whether or not
//! a steppable or the updater failed along the way.
//!
//! # Boundary sequence
//!
//! 1. Run the matching steppable hook for every registered steppable,
//!    stopping at the first rejected assignment.
//! 2. Hand each module with dirty members to the [`ModuleUpdater`], in
//!    order of first access, and acknowledge it. Dispatch stops at the
//!    first updater error.
//! 3. Acknowledge dirty identifiers that belong to no module.
//! 4. Reset the ledger.
//!
//! Step 2 runs even if step 1 failed: values written before the failure
//! are already in the document and the engine must see them. Step 3 runs
//! even if step 2 failed.
//!
//! Members of a module the updater rejected, or never reached, stay
//! dirty. The module is dispatched again on the next boundary that looks
//! up any of those members, even read-only.

use std::fmt;
use std::time::Instant;

use trellis_core::{ModuleUpdater, StepError, StepId};
use trellis_doc::ConfigDocument;
use trellis_index::{BuildReport, IndexLookupService};

use crate::config::{ConfigError, SteeringConfig};
use crate::metrics::StepMetrics;
use crate::steppable::{SteerContext, Steppable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Hook {
    Start,
    Step,
    Finish,
}

// ── SteeringLoop ───────────────────────────────────────────────────

/// Drives steppables against a live configuration document.
///
/// # Example
///
/// ```ignore
/// let mut sim = SteeringLoop::new(SteeringConfig::default(), doc, updater)?;
/// sim.add_steppable(Box::new(TemperatureRamp::new()));
/// while let Ok(metrics) = sim.step() {
///     println!("step {} touched {} ids", metrics.step, metrics.accessed);
/// }
/// sim.finish()?;
/// ```
pub struct SteeringLoop<U: ModuleUpdater> {
    doc: ConfigDocument,
    index: IndexLookupService,
    steppables: Vec<Box<dyn Steppable>>,
    updater: U,
    max_steps: Option<u64>,
    current: StepId,
    phase: Phase,
    last_metrics: StepMetrics,
}

impl<U: ModuleUpdater> SteeringLoop<U> {
    /// Take ownership of a loaded document and index it.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `config` fails validation.
    pub fn new(config: SteeringConfig, doc: ConfigDocument, updater: U) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut index = IndexLookupService::new(config.index)?;
        index.build(&doc);
        Ok(Self {
            doc,
            index,
            steppables: Vec::new(),
            updater,
            max_steps: config.max_steps,
            current: StepId::default(),
            phase: Phase::Idle,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Register a steppable. Steppables run in registration order.
    pub fn add_steppable(&mut self, steppable: Box<dyn Steppable>) {
        tracing::debug!(
            name = steppable.name(),
            frequency = steppable.frequency(),
            "steppable registered"
        );
        self.steppables.push(steppable);
    }

    /// Run every steppable's `start` hook.
    ///
    /// Called implicitly by the first [`step()`](Self::step). Calling it
    /// again once running is a no-op.
    ///
    /// # Errors
    ///
    /// [`StepError::Finished`] after [`finish()`](Self::finish), otherwise
    /// the first failure of a steppable or the updater.
    pub fn start(&mut self) -> Result<(), StepError> {
        match self.phase {
            Phase::Finished => Err(StepError::Finished),
            Phase::Running => Ok(()),
            Phase::Idle => {
                self.phase = Phase::Running;
                self.run_boundary(Hook::Start).1
            }
        }
    }

    /// Execute one step.
    ///
    /// Steppables whose [`frequency`](Steppable::frequency) does not
    /// divide the step number are skipped. The step counter advances
    /// even if the step fails.
    ///
    /// # Errors
    ///
    /// [`StepError::Finished`] once `max_steps` steps have run or after
    /// [`finish()`](Self::finish). Otherwise the first
    /// [`StepError::Steppable`] or [`StepError::ModuleUpdateFailed`]; the
    /// ledger has been reset either way.
    pub fn step(&mut self) -> Result<StepMetrics, StepError> {
        self.start()?;
        if self.max_steps.is_some_and(|max| self.current.0 >= max) {
            return Err(StepError::Finished);
        }
        let (metrics, outcome) = self.run_boundary(Hook::Step);
        self.current = self.current.next();
        tracing::trace!(
            step = %metrics.step,
            accessed = metrics.accessed,
            modules_updated = metrics.modules_updated,
            total_us = metrics.total_us,
            "step complete"
        );
        self.last_metrics = metrics;
        if let Err(e) = &outcome {
            tracing::debug!(step = %self.last_metrics.step, error = %e, "step failed");
        }
        outcome.map(|()| self.last_metrics.clone())
    }

    /// Run every steppable's `finish` hook and stop the loop.
    ///
    /// # Errors
    ///
    /// [`StepError::Finished`] if already finished, otherwise the first
    /// failure of a steppable or the updater. The loop is finished
    /// either way.
    pub fn finish(&mut self) -> Result<(), StepError> {
        if self.phase == Phase::Finished {
            return Err(StepError::Finished);
        }
        self.phase = Phase::Finished;
        self.run_boundary(Hook::Finish).1
    }

    /// Re-index the document after structural edits.
    ///
    /// Proxies from the previous build are gone; steppables must look
    /// identifiers up again.
    pub fn rebuild(&mut self) -> &BuildReport {
        self.index.build(&self.doc)
    }

    /// The configuration document.
    pub fn document(&self) -> &ConfigDocument {
        &self.doc
    }

    /// Mutable access for structural edits.
    ///
    /// Adding or removing identifier-bearing nodes leaves the index
    /// stale until [`rebuild()`](Self::rebuild).
    pub fn document_mut(&mut self) -> &mut ConfigDocument {
        &mut self.doc
    }

    /// The lookup service.
    pub fn service(&self) -> &IndexLookupService {
        &self.index
    }

    /// The module updater.
    pub fn updater(&self) -> &U {
        &self.updater
    }

    /// The next step to run (0 before the first step).
    pub fn current_step(&self) -> StepId {
        self.current
    }

    /// Whether [`finish()`](Self::finish) has been called.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Give the document back, e.g. for serialisation.
    pub fn into_document(self) -> ConfigDocument {
        self.doc
    }

    fn run_boundary(&mut self, hook: Hook) -> (StepMetrics, Result<(), StepError>) {
        let started = Instant::now();
        let step = self.current;
        let mut metrics = StepMetrics {
            step,
            ..StepMetrics::default()
        };

        let ran = {
            let mut ctx = SteerContext::new(&mut self.doc, &mut self.index, step);
            run_hooks(&mut self.steppables, &mut ctx, hook, &mut metrics.steppable_us)
        };
        let dispatched = self.dispatch(&mut metrics);

        metrics.accessed = self.index.recently_accessed().len();
        self.index.reset();
        metrics.total_us = started.elapsed().as_micros() as u64;
        (metrics, ran.and(dispatched))
    }

    fn dispatch(&mut self, metrics: &mut StepMetrics) -> Result<(), StepError> {
        let mut outcome = Ok(());
        for update in self.index.pending_module_updates() {
            tracing::trace!(
                module = %update.scope.module_key,
                ids = ?update.ids,
                "dispatching module update"
            );
            let updated =
                self.updater
                    .update_module(&update.scope.module_key, update.scope.node, &self.doc);
            if let Err(e) = updated {
                outcome = Err(e);
                break;
            }
            self.index.acknowledge(&update);
            metrics.modules_updated += 1;
        }

        let unscoped = self.index.unscoped_dirty();
        if !unscoped.is_empty() {
            tracing::debug!(ids = ?unscoped, "dirty identifiers outside any module");
        }
        metrics.unscoped_dirty = unscoped.len();
        self.index.acknowledge_unscoped();
        outcome
    }
}

fn run_hooks(
    steppables: &mut [Box<dyn Steppable>],
    ctx: &mut SteerContext<'_>,
    hook: Hook,
    timings: &mut Vec<(String, u64)>,
) -> Result<(), StepError> {
    for steppable in steppables.iter_mut() {
        if hook == Hook::Step && ctx.step().0 % steppable.frequency().max(1) != 0 {
            continue;
        }
        let started = Instant::now();
        let result = match hook {
            Hook::Start => steppable.start(ctx),
            Hook::Step => steppable.step(ctx),
            Hook::Finish => steppable.finish(ctx),
        };
        timings.push((
            steppable.name().to_string(),
            started.elapsed().as_micros() as u64,
        ));
        result.map_err(|reason| StepError::Steppable {
            name: steppable.name().to_string(),
            reason,
        })?;
    }
    Ok(())
}

impl<U: ModuleUpdater> fmt::Debug for SteeringLoop<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteeringLoop")
            .field("current_step", &self.current)
            .field("phase", &self.phase)
            .field("steppables", &self.steppables.len())
            .field("indexed", &self.index.len())
            .finish()
    }
}
