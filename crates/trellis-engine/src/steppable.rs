//! The component interface driven by the steering loop.
//!
//! A [`Steppable`] is anything that runs on the simulation clock and may
//! tweak configuration as it goes: a parameter scan, a feedback
//! controller, a scripted schedule. It never sees the index or the
//! document directly, only a [`SteerContext`] for the current phase.

use std::fmt;

use trellis_core::{AssignmentError, StepId};
use trellis_doc::ConfigDocument;
use trellis_index::{IndexLookupService, NodeProxy};

// ── SteerContext ───────────────────────────────────────────────────

/// Configuration access handed to a [`Steppable`] for one call.
///
/// Every lookup through the context is recorded in the access ledger,
/// so the loop can tell which modules to re-initialise afterwards.
pub struct SteerContext<'a> {
    doc: &'a mut ConfigDocument,
    index: &'a mut IndexLookupService,
    step: StepId,
}

impl<'a> SteerContext<'a> {
    pub(crate) fn new(
        doc: &'a mut ConfigDocument,
        index: &'a mut IndexLookupService,
        step: StepId,
    ) -> Self {
        Self { doc, index, step }
    }

    /// The step being executed. `start` sees the first step to run,
    /// `finish` the step after the last one that ran.
    pub fn step(&self) -> StepId {
        self.step
    }

    /// Look up `id`, recording the access.
    ///
    /// `None` means the identifier is not in the configuration; optional
    /// parameters are expected to be missing sometimes.
    pub fn get(&mut self, id: &str) -> Option<&NodeProxy> {
        self.index.get(id).map(|proxy| &*proxy)
    }

    /// Assign `field` on the node indexed as `id`.
    ///
    /// Returns `Ok(false)` if `id` is not indexed; nothing is written.
    ///
    /// # Errors
    ///
    /// Whatever [`NodeProxy::set`] rejects.
    pub fn set(
        &mut self,
        id: &str,
        field: &str,
        value: impl fmt::Display,
    ) -> Result<bool, AssignmentError> {
        match self.index.get(id) {
            Some(proxy) => proxy.set(&mut *self.doc, field, value).map(|()| true),
            None => Ok(false),
        }
    }

    /// Assign the free-text content of the node indexed as `id`.
    ///
    /// Same contract as [`set`](Self::set).
    pub fn set_content(&mut self, id: &str, value: impl fmt::Display) -> Result<bool, AssignmentError> {
        self.set(id, trellis_index::CONTENT_FIELD, value)
    }

    /// Read-only view of the whole document.
    pub fn document(&self) -> &ConfigDocument {
        &*self.doc
    }
}

impl fmt::Debug for SteerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteerContext")
            .field("step", &self.step)
            .field("indexed", &self.index.len())
            .finish()
    }
}

// ── Steppable ──────────────────────────────────────────────────────

/// A component run by the steering loop.
///
/// Only [`name`](Self::name) and [`step`](Self::step) are required.
pub trait Steppable {
    /// Name used in logs, metrics and errors.
    fn name(&self) -> &str;

    /// Run [`step`](Self::step) only on steps divisible by this value.
    /// Zero is treated as one.
    fn frequency(&self) -> u64 {
        1
    }

    /// Called once by [`SteeringLoop::start`](crate::SteeringLoop::start).
    fn start(&mut self, _ctx: &mut SteerContext<'_>) -> Result<(), AssignmentError> {
        Ok(())
    }

    /// Called on every step matching [`frequency`](Self::frequency).
    fn step(&mut self, ctx: &mut SteerContext<'_>) -> Result<(), AssignmentError>;

    /// Called once by [`SteeringLoop::finish`](crate::SteeringLoop::finish).
    fn finish(&mut self, _ctx: &mut SteerContext<'_>) -> Result<(), AssignmentError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_index::IndexConfig;
    use trellis_test_utils::cell_sorting_document;

    fn setup() -> (ConfigDocument, IndexLookupService) {
        let doc = cell_sorting_document();
        let mut index = IndexLookupService::new(IndexConfig::default()).unwrap();
        index.build(&doc);
        (doc, index)
    }

    #[test]
    fn get_records_access() {
        let (mut doc, mut index) = setup();
        let mut ctx = SteerContext::new(&mut doc, &mut index, StepId(3));
        assert_eq!(ctx.step(), StepId(3));
        assert_eq!(ctx.get("temperature").unwrap().content(), "10.0");
        assert!(ctx.get("missing").is_none());
        assert_eq!(index.recently_accessed().len(), 1);
    }

    #[test]
    fn set_writes_through_to_document() {
        let (mut doc, mut index) = setup();
        let mut ctx = SteerContext::new(&mut doc, &mut index, StepId(0));
        assert_eq!(ctx.set_content("target_volume", 30), Ok(true));
        assert_eq!(ctx.set("absent", "value", 1), Ok(false));
        assert!(ctx.set("target_volume", "bogus", 1).is_err());

        let node = index.peek("target_volume").unwrap().node();
        use trellis_core::DocumentRead;
        assert_eq!(doc.content(node), Some("30"));
    }
}
