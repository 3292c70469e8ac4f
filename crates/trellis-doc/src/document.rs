//! Arena storage for configuration nodes.

use indexmap::IndexMap;
use trellis_core::{DocumentError, DocumentRead, DocumentWrite, NodeId};

/// One element of the configuration tree.
#[derive(Clone, Debug, Default)]
struct DocNode {
    name: String,
    attributes: IndexMap<String, String>,
    content: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// An in-memory configuration tree stored as a node arena.
///
/// Slots are never reused: removing a subtree tombstones its slots, so a
/// stale [`NodeId`] resolves to "not found" instead of aliasing a newer
/// node.
#[derive(Clone, Debug, Default)]
pub struct ConfigDocument {
    nodes: Vec<Option<DocNode>>,
    root: Option<NodeId>,
}

impl ConfigDocument {
    /// Create an empty document with no root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Parent of `node`, or `None` for the root and for dead handles.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    /// Slash-joined element names from the root down to `node`.
    ///
    /// Used in log fields and error messages, e.g. `/CompuCell3D/Plugin/Energy`.
    pub fn path(&self, node: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            let n = self.node(id)?;
            names.push(n.name.as_str());
            cursor = n.parent;
        }
        names.reverse();
        Some(format!("/{}", names.join("/")))
    }

    /// All live nodes in depth-first pre-order, starting at the root.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Append a new element under `parent`.
    ///
    /// This is a structural edit that bypasses any index built over the
    /// document; such an index must be rebuilt afterwards.
    pub fn append_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId, DocumentError> {
        if !self.contains(parent) {
            return Err(DocumentError::NodeNotFound { node: parent });
        }
        self.alloc(name, Some(parent))
    }

    /// Remove `node` and its whole subtree.
    ///
    /// Handles into the removed subtree become dead. Removing the root
    /// empties the document. Like [`append_child`](Self::append_child),
    /// this invalidates any index over the document.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DocumentError> {
        let parent = self
            .node(node)
            .ok_or(DocumentError::NodeNotFound { node })?
            .parent;
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.retain(|&c| c != node);
        }
        if self.root == Some(node) {
            self.root = None;
        }
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(dead) = self.nodes.get_mut(id.index()).and_then(Option::take) {
                stack.extend(dead.children);
            }
        }
        Ok(())
    }

    /// Allocate a node and link it under `parent` (or make it the root).
    pub(crate) fn alloc(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
    ) -> Result<NodeId, DocumentError> {
        let id = slot_handle(self.nodes.len())?;
        self.nodes.push(Some(DocNode {
            name: name.to_string(),
            parent,
            ..DocNode::default()
        }));
        match parent.and_then(|p| self.node_mut(p)) {
            Some(p) => p.children.push(id),
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }
        Ok(id)
    }

    fn node(&self, id: NodeId) -> Option<&DocNode> {
        self.nodes.get(id.index())?.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut DocNode> {
        self.nodes.get_mut(id.index())?.as_mut()
    }
}

/// Handle for the arena slot at `len`.
fn slot_handle(len: usize) -> Result<NodeId, DocumentError> {
    u32::try_from(len)
        .map(NodeId)
        .map_err(|_| DocumentError::CapacityExceeded)
}

impl DocumentRead for ConfigDocument {
    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.name.as_str())
    }

    fn attributes(&self, node: NodeId) -> Option<&IndexMap<String, String>> {
        self.node(node).map(|n| &n.attributes)
    }

    fn content(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.content.as_str())
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map_or(&[], |n| n.children.as_slice())
    }
}

impl DocumentWrite for ConfigDocument {
    fn update_attributes(
        &mut self,
        node: NodeId,
        updates: &[(&str, &str)],
    ) -> Result<(), DocumentError> {
        let n = self
            .node_mut(node)
            .ok_or(DocumentError::NodeNotFound { node })?;
        for (key, value) in updates {
            n.attributes.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn set_content(&mut self, node: NodeId, text: &str) -> Result<(), DocumentError> {
        let n = self
            .node_mut(node)
            .ok_or(DocumentError::NodeNotFound { node })?;
        n.content.clear();
        n.content.push_str(text);
        Ok(())
    }
}
