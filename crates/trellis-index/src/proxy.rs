//! Mutable facade over one indexed configuration node.
//!
//! A [`NodeProxy`] snapshots a node's attributes and content when the
//! index is built. From then on the set of assignable fields is closed:
//! values can change, but no field can be added. Every accepted write
//! is mirrored into the backing document and marks the proxy dirty, so
//! the step loop knows which modules need re-initialising.

use std::fmt;

use indexmap::IndexMap;
use trellis_core::{AssignmentError, DocumentRead, DocumentWrite, NodeId};

use crate::scope::ScopeRef;

/// Pseudo-field addressing a node's free-text content.
///
/// Writes to it travel on the document's text-update path; every other
/// field is an attribute. If a node also carries an attribute literally
/// named `cdata`, the content wins.
pub const CONTENT_FIELD: &str = "cdata";

/// A mutable view of one identifier-bearing node.
///
/// # Invariants
///
/// - The key set of `values` is fixed at construction.
/// - `dirty` only goes `false → true` through a successful [`set`](Self::set)
///   and only goes back through [`reset_dirty`](Self::reset_dirty).
/// - `node` and `scope` are handles, assigned once, never reassigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeProxy {
    id: String,
    node: NodeId,
    values: IndexMap<String, String>,
    dirty: bool,
    scope: Option<ScopeRef>,
}

impl NodeProxy {
    /// Wrap `node`, seeding values from its current content and attributes.
    ///
    /// Returns `None` if `node` is not a live node of `doc`.
    pub fn new(
        id: impl Into<String>,
        node: NodeId,
        doc: &dyn DocumentRead,
        scope: Option<ScopeRef>,
    ) -> Option<Self> {
        let attributes = doc.attributes(node)?;
        let mut values = IndexMap::with_capacity(attributes.len() + 1);
        values.insert(
            CONTENT_FIELD.to_string(),
            doc.content(node).unwrap_or_default().to_string(),
        );
        for (key, value) in attributes {
            values.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Some(Self {
            id: id.into(),
            node,
            values,
            dirty: false,
            scope,
        })
    }

    /// Identifier this proxy is indexed under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Handle of the backing node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Nearest enclosing module scope, or `None` for an unscoped node.
    pub fn scope(&self) -> Option<&ScopeRef> {
        self.scope.as_ref()
    }

    /// Whether the proxy has been written since the last reset.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The assignable fields, content first, then attributes in document order.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Whether `field` may be assigned.
    pub fn is_assignable(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Current local value of `field`.
    ///
    /// Never touches the document. `None` only for fields outside the
    /// assignable set.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Current free-text content.
    pub fn content(&self) -> &str {
        self.get(CONTENT_FIELD).unwrap_or_default()
    }

    /// Assign `field`, mirror the change into `doc`, and mark the proxy dirty.
    ///
    /// The value is rendered with `Display` before it is stored, so
    /// numeric values can be passed directly.
    ///
    /// # Errors
    ///
    /// [`AssignmentError::NotAssignable`] if `field` was not present at
    /// construction, [`AssignmentError::Detached`] if the backing node is
    /// gone. On error nothing changes: not the local value, not the
    /// document, not the dirty flag.
    pub fn set(
        &mut self,
        doc: &mut dyn DocumentWrite,
        field: &str,
        value: impl fmt::Display,
    ) -> Result<(), AssignmentError> {
        if !self.values.contains_key(field) {
            tracing::debug!(id = %self.id, field, "assignment to non-assignable field denied");
            return Err(AssignmentError::NotAssignable {
                field: field.to_string(),
                allowed: self.values.keys().cloned().collect(),
            });
        }
        let node = self.node;
        let text = value.to_string();
        let forwarded = if field == CONTENT_FIELD {
            doc.set_content(node, &text)
        } else {
            doc.update_attributes(node, &[(field, text.as_str())])
        };
        forwarded.map_err(|_| AssignmentError::Detached {
            id: self.id.clone(),
            node,
        })?;

        if let Some(slot) = self.values.get_mut(field) {
            *slot = text;
        }
        self.dirty = true;
        Ok(())
    }

    /// Assign the free-text content. Shorthand for `set(doc, CONTENT_FIELD, value)`.
    pub fn set_content(
        &mut self,
        doc: &mut dyn DocumentWrite,
        value: impl fmt::Display,
    ) -> Result<(), AssignmentError> {
        self.set(doc, CONTENT_FIELD, value)
    }

    /// Clear the dirty flag once a pending change has been applied.
    ///
    /// Does not touch the backing document.
    pub fn reset_dirty(&mut self) {
        self.dirty = false;
    }
}
