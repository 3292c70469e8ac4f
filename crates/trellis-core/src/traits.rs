//! Document access traits.
//!
//! The configuration tree is owned by whoever loaded it. Everything in
//! Trellis reaches it through these two traits and plain [`NodeId`]
//! handles, so the index never takes ownership of the tree.

use indexmap::IndexMap;

use crate::error::{DocumentError, StepError};
use crate::id::NodeId;

/// Read-only access to an already-parsed configuration tree.
///
/// Every accessor returns `None` (or an empty slice) for a handle that
/// does not name a live node, rather than panicking.
pub trait DocumentRead {
    /// The document root, or `None` for an empty document.
    fn root(&self) -> Option<NodeId>;

    /// Whether `node` names a live node.
    fn contains(&self, node: NodeId) -> bool;

    /// Element name of `node` (e.g. `Plugin`).
    fn name(&self, node: NodeId) -> Option<&str>;

    /// Attributes of `node` in document order.
    fn attributes(&self, node: NodeId) -> Option<&IndexMap<String, String>>;

    /// Free-text content of `node`. Empty string when the node has none.
    fn content(&self, node: NodeId) -> Option<&str>;

    /// Children of `node` in document order.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Value of a single attribute.
    fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attributes(node)?.get(key).map(String::as_str)
    }
}

/// Mutation paths into a configuration tree.
///
/// Attribute and text changes travel on separate paths because native
/// engine state is re-read from them differently.
pub trait DocumentWrite: DocumentRead {
    /// Merge `updates` into the attributes of `node`.
    ///
    /// Existing keys keep their position; unknown keys are appended.
    fn update_attributes(
        &mut self,
        node: NodeId,
        updates: &[(&str, &str)],
    ) -> Result<(), DocumentError>;

    /// Replace the free-text content of `node`.
    fn set_content(&mut self, node: NodeId, text: &str) -> Result<(), DocumentError>;
}

/// Hook into the native engine that re-reads a module's configuration.
///
/// Called by the steering loop once per changed module per step, after
/// the new values have been written into the document.
pub trait ModuleUpdater {
    /// Re-initialise the module rooted at `scope`.
    ///
    /// `module_key` is the composite module name (e.g. `PluginVolume`).
    fn update_module(
        &mut self,
        module_key: &str,
        scope: NodeId,
        doc: &dyn DocumentRead,
    ) -> Result<(), StepError>;
}

impl<U: ModuleUpdater + ?Sized> ModuleUpdater for Box<U> {
    fn update_module(
        &mut self,
        module_key: &str,
        scope: NodeId,
        doc: &dyn DocumentRead,
    ) -> Result<(), StepError> {
        (**self).update_module(module_key, scope, doc)
    }
}
