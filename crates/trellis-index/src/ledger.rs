//! Per-step record of which indexed nodes were looked up.

use indexmap::IndexSet;

/// Slots of the [`IdIndex`](crate::IdIndex) looked up since the last clear.
///
/// The ledger stores slot numbers, not proxies: the index stays the
/// only owner. Slots are recorded once each, in order of first access,
/// and stay valid until the index is rebuilt (which also clears the
/// ledger). The ledger is never cleared implicitly.
#[derive(Clone, Debug, Default)]
pub struct AccessLedger {
    touched: IndexSet<usize>,
}

impl AccessLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an access to `slot`. Returns `true` on the first access this step.
    pub fn record(&mut self, slot: usize) -> bool {
        self.touched.insert(slot)
    }

    /// Whether `slot` was accessed this step.
    pub fn contains(&self, slot: usize) -> bool {
        self.touched.contains(&slot)
    }

    /// Forget every recorded access.
    pub fn clear(&mut self) {
        self.touched.clear();
    }

    /// Number of distinct slots accessed.
    pub fn len(&self) -> usize {
        self.touched.len()
    }

    /// Whether nothing has been accessed.
    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    /// Accessed slots in order of first access.
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.touched.iter().copied()
    }
}
