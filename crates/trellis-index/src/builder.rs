//! One-shot construction of the identifier index.
//!
//! [`IdIndexBuilder`] walks the document depth-first exactly once. On
//! the way down it opens a scope for every scope-kind node; for each
//! child carrying the identifier attribute it builds a [`NodeProxy`]
//! bound to the innermost open scope; on the way back up it closes the
//! scope again. Scope therefore follows structural nesting, never
//! document order.
//!
//! The walk is not incremental. Any structural edit made to the
//! document outside this crate requires a fresh build. The document
//! must be acyclic; cycles are not detected.

use indexmap::IndexMap;
use trellis_core::{DocumentRead, NodeId};

use crate::config::IndexConfig;
use crate::proxy::NodeProxy;
use crate::scope::{ScopeRef, ScopeStack};

// ── IdIndex ────────────────────────────────────────────────────────

/// Identifier → proxy map, the sole owner of its proxies.
///
/// Entries are kept in document order of the winning node and are
/// never removed; slot numbers are stable for the life of the index.
#[derive(Clone, Debug, Default)]
pub struct IdIndex {
    proxies: IndexMap<String, NodeProxy>,
}

impl IdIndex {
    /// Number of indexed identifiers.
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Proxy for `id`.
    pub fn get(&self, id: &str) -> Option<&NodeProxy> {
        self.proxies.get(id)
    }

    /// Stable slot number of `id`.
    pub fn slot_of(&self, id: &str) -> Option<usize> {
        self.proxies.get_index_of(id)
    }

    /// Identifier and proxy stored at `slot`.
    pub fn slot(&self, slot: usize) -> Option<(&str, &NodeProxy)> {
        self.proxies
            .get_index(slot)
            .map(|(id, proxy)| (id.as_str(), proxy))
    }

    /// Mutable proxy stored at `slot`.
    pub fn slot_mut(&mut self, slot: usize) -> Option<&mut NodeProxy> {
        self.proxies.get_index_mut(slot).map(|(_, proxy)| proxy)
    }

    /// Indexed identifiers in document order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.proxies.keys().map(String::as_str)
    }

    /// `(id, proxy)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeProxy)> + '_ {
        self.proxies.iter().map(|(id, p)| (id.as_str(), p))
    }

    /// Insert `proxy`, replacing and returning any earlier proxy with the
    /// same identifier. The newcomer takes the last position.
    fn insert(&mut self, proxy: NodeProxy) -> Option<NodeProxy> {
        let replaced = self.proxies.shift_remove(proxy.id());
        self.proxies.insert(proxy.id().to_string(), proxy);
        replaced
    }
}

// ── BuildReport ────────────────────────────────────────────────────

/// Two nodes declared the same identifier; the later one won.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateId {
    /// The shared identifier.
    pub id: String,
    /// The earlier node, no longer reachable through the index.
    pub superseded: NodeId,
    /// The later node, now indexed.
    pub winner: NodeId,
}

/// Diagnostics from one index build. Nothing in here is fatal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of identifiers in the finished index.
    pub indexed: usize,
    /// Identifier collisions, in the order they were encountered.
    pub duplicates: Vec<DuplicateId>,
    /// Indexed identifiers with no enclosing scope-kind ancestor.
    pub unscoped: Vec<String>,
}

// ── IdIndexBuilder ─────────────────────────────────────────────────

/// Single-pass walker producing an [`IdIndex`].
pub struct IdIndexBuilder<'c> {
    config: &'c IndexConfig,
    scopes: ScopeStack,
    index: IdIndex,
    duplicates: Vec<DuplicateId>,
}

impl<'c> IdIndexBuilder<'c> {
    /// Create a builder using `config`.
    pub fn new(config: &'c IndexConfig) -> Self {
        Self {
            config,
            scopes: ScopeStack::new(),
            index: IdIndex::default(),
            duplicates: Vec::new(),
        }
    }

    /// Walk `doc` and return the finished index.
    ///
    /// The root element is visited (and may open a scope) but is not
    /// itself indexed. An empty document yields an empty index.
    pub fn build(mut self, doc: &dyn DocumentRead) -> (IdIndex, BuildReport) {
        if let Some(root) = doc.root() {
            self.walk(doc, root, 0);
        }
        debug_assert!(self.scopes.is_empty(), "scope stack unbalanced after walk");

        let unscoped: Vec<String> = self
            .index
            .iter()
            .filter(|(_, p)| p.scope().is_none())
            .map(|(id, _)| id.to_string())
            .collect();
        for id in &unscoped {
            tracing::debug!(id = %id, "identifier has no enclosing module scope");
        }
        let report = BuildReport {
            indexed: self.index.len(),
            duplicates: self.duplicates,
            unscoped,
        };
        tracing::debug!(
            indexed = report.indexed,
            duplicates = report.duplicates.len(),
            unscoped = report.unscoped.len(),
            "identifier index built"
        );
        (self.index, report)
    }

    fn walk(&mut self, doc: &dyn DocumentRead, node: NodeId, depth: usize) {
        let opened = match doc.name(node) {
            Some(name) if self.config.is_scope_kind(name) => {
                let module_key = self
                    .config
                    .module_key(doc, node)
                    .unwrap_or_else(|| name.to_string());
                self.scopes.push(
                    ScopeRef {
                        node,
                        kind: name.to_string(),
                        module_key,
                    },
                    depth,
                );
                true
            }
            _ => false,
        };

        for &child in doc.children(node) {
            if let Some(id) = doc.attribute(child, &self.config.id_attribute) {
                let scope = self.scopes.peek().cloned();
                if let Some(proxy) = NodeProxy::new(id, child, doc, scope) {
                    self.index_proxy(proxy);
                }
            }
            self.walk(doc, child, depth + 1);
        }

        if opened {
            self.scopes.pop(depth);
        }
    }

    fn index_proxy(&mut self, proxy: NodeProxy) {
        let winner = proxy.node();
        if let Some(old) = self.index.insert(proxy) {
            let superseded = old.node();
            tracing::warn!(
                id = %old.id(),
                %superseded,
                %winner,
                "duplicate identifier, later node wins"
            );
            self.duplicates.push(DuplicateId {
                id: old.id().to_string(),
                superseded,
                winner,
            });
        }
    }
}
