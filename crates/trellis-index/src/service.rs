//! Public lookup facade combining the index and the access ledger.
//!
//! # Step contract
//!
//! 1. [`build()`](IndexLookupService::build) once the loader has a document.
//! 2. During a step, components call [`get()`](IndexLookupService::get)
//!    and write through the returned proxy.
//! 3. At the step boundary the owning loop reads
//!    [`recently_accessed()`](IndexLookupService::recently_accessed) or
//!    [`pending_module_updates()`](IndexLookupService::pending_module_updates),
//!    then calls [`reset()`](IndexLookupService::reset) exactly once.
//!
//! Structural edits to the document made elsewhere leave the service
//! stale. Nothing detects that; the caller must build again.

use indexmap::IndexMap;
use trellis_core::{DocumentRead, NodeId};

use crate::builder::{BuildReport, IdIndex, IdIndexBuilder};
use crate::config::{IndexConfig, IndexConfigError};
use crate::ledger::AccessLedger;
use crate::proxy::NodeProxy;
use crate::scope::ScopeRef;

/// Lifecycle state of an [`IndexLookupService`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceState {
    /// No document has been indexed yet. Every lookup misses.
    Uninitialized,
    /// An index is available.
    Ready,
}

/// Dirty proxies that share one module scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleUpdate {
    /// The module to re-initialise.
    pub scope: ScopeRef,
    /// Dirty identifiers inside it, in order of first access.
    pub ids: Vec<String>,
}

/// Identifier lookups with a per-step access ledger.
#[derive(Debug)]
pub struct IndexLookupService {
    config: IndexConfig,
    index: IdIndex,
    ledger: AccessLedger,
    state: ServiceState,
    generation: u64,
    last_report: BuildReport,
}

impl IndexLookupService {
    /// Create an uninitialized service.
    pub fn new(config: IndexConfig) -> Result<Self, IndexConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            index: IdIndex::default(),
            ledger: AccessLedger::new(),
            state: ServiceState::Uninitialized,
            generation: 0,
            last_report: BuildReport::default(),
        })
    }

    /// Index `doc`, replacing any previous index and clearing the ledger.
    ///
    /// This is also the only way back from a stale index. Proxies
    /// returned before the call belong to the old index; callers must
    /// not hold on to them.
    pub fn build(&mut self, doc: &dyn DocumentRead) -> &BuildReport {
        let (index, report) = IdIndexBuilder::new(&self.config).build(doc);
        self.index = index;
        self.ledger.clear();
        self.state = ServiceState::Ready;
        self.generation += 1;
        self.last_report = report;
        &self.last_report
    }

    /// Look up `id` and record the access.
    ///
    /// A miss is normal (optional configuration) and is not recorded.
    pub fn get(&mut self, id: &str) -> Option<&mut NodeProxy> {
        let Some(slot) = self.index.slot_of(id) else {
            tracing::trace!(id, "identifier lookup missed");
            return None;
        };
        self.ledger.record(slot);
        self.index.slot_mut(slot)
    }

    /// Look up `id` without recording the access.
    pub fn peek(&self, id: &str) -> Option<&NodeProxy> {
        self.index.get(id)
    }

    /// Whether `id` is indexed.
    pub fn contains(&self, id: &str) -> bool {
        self.index.slot_of(id).is_some()
    }

    /// Number of indexed identifiers.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Indexed identifiers in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.ids()
    }

    /// Clear the access ledger. The index is untouched.
    pub fn reset(&mut self) {
        self.ledger.clear();
    }

    /// Snapshot of the identifiers looked up since the last reset.
    pub fn recently_accessed(&self) -> IndexMap<&str, &NodeProxy> {
        self.ledger
            .slots()
            .filter_map(|slot| self.index.slot(slot))
            .collect()
    }

    /// Dirty proxies from this step's ledger, grouped by module scope.
    ///
    /// Modules appear in the order their first dirty member was looked
    /// up. Unscoped proxies are left out; see
    /// [`unscoped_dirty()`](Self::unscoped_dirty).
    pub fn pending_module_updates(&self) -> Vec<ModuleUpdate> {
        let mut grouped: IndexMap<NodeId, ModuleUpdate> = IndexMap::new();
        for (id, proxy) in self.dirty_in_ledger() {
            let Some(scope) = proxy.scope() else {
                continue;
            };
            grouped
                .entry(scope.node)
                .or_insert_with(|| ModuleUpdate {
                    scope: scope.clone(),
                    ids: Vec::new(),
                })
                .ids
                .push(id.to_string());
        }
        grouped.into_values().collect()
    }

    /// Dirty proxies from this step's ledger that belong to no module.
    pub fn unscoped_dirty(&self) -> Vec<&str> {
        self.dirty_in_ledger()
            .filter(|(_, p)| p.scope().is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Clear the dirty flag of every proxy named in `update`.
    pub fn acknowledge(&mut self, update: &ModuleUpdate) {
        for id in &update.ids {
            if let Some(proxy) = self.index.slot_of(id).and_then(|s| self.index.slot_mut(s)) {
                proxy.reset_dirty();
            }
        }
    }

    /// Clear the dirty flag of every unscoped proxy in this step's ledger.
    ///
    /// Such proxies have no module to re-initialise; the caller decides
    /// what a change to them means and then acknowledges it here.
    pub fn acknowledge_unscoped(&mut self) {
        for slot in self.ledger.slots() {
            if let Some(proxy) = self.index.slot_mut(slot) {
                if proxy.scope().is_none() {
                    proxy.reset_dirty();
                }
            }
        }
    }

    /// Lifecycle state.
    pub fn state(&self) -> ServiceState {
        self.state
    }

    /// Number of completed builds. Changes whenever proxies are replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Diagnostics from the most recent build.
    pub fn last_report(&self) -> &BuildReport {
        &self.last_report
    }

    /// The configuration this service indexes with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    fn dirty_in_ledger(&self) -> impl Iterator<Item = (&str, &NodeProxy)> + '_ {
        self.ledger
            .slots()
            .filter_map(|slot| self.index.slot(slot))
            .filter(|(_, p)| p.is_dirty())
    }
}
