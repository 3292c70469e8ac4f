//! Module scope tracking for the index walk.
//!
//! A scope is the nearest enclosing scope-kind ancestor of a node (a
//! `Potts`, `Plugin` or `Steppable` block by default). [`ScopeStack`]
//! is threaded explicitly through the walk; there is no global scope
//! state anywhere.

use smallvec::SmallVec;
use trellis_core::NodeId;

/// A resolved module scope.
///
/// Holds only a handle to the scope node plus the two strings the step
/// loop needs to name the module, so it never borrows the document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeRef {
    /// Handle to the scope-kind node.
    pub node: NodeId,
    /// Element name of the scope node (`Plugin`, ...).
    pub kind: String,
    /// Composite module name (`PluginVolume`, ...).
    pub module_key: String,
}

#[derive(Clone, Debug)]
struct ScopeFrame {
    scope: ScopeRef,
    depth: usize,
}

/// Stack of open scopes, keyed by the depth at which each was opened.
///
/// Pushes and pops are symmetric per depth: [`pop`](Self::pop) only
/// removes the top frame if it was pushed at the same depth, so leaving
/// an unrelated node can never drop an ancestor's scope.
#[derive(Clone, Debug, Default)]
pub struct ScopeStack {
    frames: SmallVec<[ScopeFrame; 4]>,
}

impl ScopeStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `scope` at tree depth `depth`.
    pub fn push(&mut self, scope: ScopeRef, depth: usize) {
        self.frames.push(ScopeFrame { scope, depth });
    }

    /// Close the scope opened at `depth`.
    ///
    /// Returns the closed scope, or `None` (leaving the stack untouched)
    /// if the top frame belongs to a different depth.
    pub fn pop(&mut self, depth: usize) -> Option<ScopeRef> {
        if self.frames.last()?.depth != depth {
            return None;
        }
        self.frames.pop().map(|f| f.scope)
    }

    /// The innermost open scope, or `None` when no scope is open.
    pub fn peek(&self) -> Option<&ScopeRef> {
        self.frames.last().map(|f| &f.scope)
    }

    /// Number of open scopes.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no scope is open.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(n: u32, key: &str) -> ScopeRef {
        ScopeRef {
            node: NodeId(n),
            kind: "Plugin".into(),
            module_key: key.into(),
        }
    }

    #[test]
    fn empty_stack_peeks_none() {
        let stack = ScopeStack::new();
        assert!(stack.peek().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let mut stack = ScopeStack::new();
        stack.push(scope(1, "outer"), 1);
        stack.push(scope(2, "inner"), 3);
        assert_eq!(stack.peek().unwrap().module_key, "inner");
        assert_eq!(stack.pop(3).unwrap().module_key, "inner");
        assert_eq!(stack.peek().unwrap().module_key, "outer");
        assert_eq!(stack.pop(1).unwrap().module_key, "outer");
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_at_foreign_depth_is_ignored() {
        let mut stack = ScopeStack::new();
        stack.push(scope(1, "outer"), 1);
        assert!(stack.pop(2).is_none());
        assert_eq!(stack.len(), 1);
        assert!(stack.pop(0).is_none());
        assert_eq!(stack.peek().unwrap().node, NodeId(1));
    }

    #[test]
    fn pop_on_empty_stack_is_none() {
        let mut stack = ScopeStack::new();
        assert!(stack.pop(0).is_none());
    }
}
