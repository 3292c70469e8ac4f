//! Strongly-typed identifiers.

use std::fmt;

/// Handle to a node inside a configuration document arena.
///
/// Node handles are non-owning: they stay `Copy` and never keep the
/// document alive. `NodeId(n)` is the n-th node allocated by the loader,
/// so the document root of a freshly built tree is always `NodeId(0)`.
/// A handle may outlive the document it came from; every access through
/// [`DocumentRead`](crate::DocumentRead) checks it again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The handle as an arena slot index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing simulation step counter.
///
/// Incremented each time the steering loop completes one step. The
/// access ledger is scoped to exactly one `StepId`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// The step following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
