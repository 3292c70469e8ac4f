//! Index configuration and validation.

use std::error::Error;
use std::fmt;

use trellis_core::{DocumentRead, NodeId};

// ── IndexConfig ────────────────────────────────────────────────────

/// Which attribute identifies nodes and which element names open a
/// module scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexConfig {
    /// Attribute whose value is the lookup key. Default: `id`.
    pub id_attribute: String,
    /// Element names that open a module scope.
    /// Default: `Potts`, `Plugin`, `Steppable`.
    pub scope_kinds: Vec<String>,
    /// Attributes consulted, in order, when naming a module scope.
    /// The first one present is appended to the element name.
    /// Default: `Name`, `Type`.
    pub module_key_attributes: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            id_attribute: "id".to_string(),
            scope_kinds: vec![
                "Potts".to_string(),
                "Plugin".to_string(),
                "Steppable".to_string(),
            ],
            module_key_attributes: vec!["Name".to_string(), "Type".to_string()],
        }
    }
}

impl IndexConfig {
    /// Validate structural invariants.
    pub fn validate(&self) -> Result<(), IndexConfigError> {
        if self.id_attribute.trim().is_empty() {
            return Err(IndexConfigError::EmptyIdAttribute);
        }
        if self.scope_kinds.is_empty() {
            return Err(IndexConfigError::NoScopeKinds);
        }
        if let Some(pos) = self.scope_kinds.iter().position(|k| k.trim().is_empty()) {
            return Err(IndexConfigError::InvalidScopeKind {
                reason: format!("scope kind at position {pos} is blank"),
            });
        }
        Ok(())
    }

    /// Whether an element named `name` opens a module scope.
    pub fn is_scope_kind(&self, name: &str) -> bool {
        self.scope_kinds.iter().any(|k| k == name)
    }

    /// Composite module name for a scope node, e.g. `PluginVolume`.
    ///
    /// Falls back to the bare element name when none of the key
    /// attributes are present. Returns `None` for a dead handle.
    pub fn module_key(&self, doc: &dyn DocumentRead, node: NodeId) -> Option<String> {
        let name = doc.name(node)?;
        let suffix = self
            .module_key_attributes
            .iter()
            .find_map(|key| doc.attribute(node, key));
        Some(match suffix {
            Some(s) => format!("{name}{s}"),
            None => name.to_string(),
        })
    }
}

// ── IndexConfigError ───────────────────────────────────────────────

/// Errors detected during [`IndexConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexConfigError {
    /// The identifier attribute name is empty.
    EmptyIdAttribute,
    /// No scope kinds were configured.
    NoScopeKinds,
    /// A scope kind entry is unusable.
    InvalidScopeKind {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for IndexConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdAttribute => write!(f, "id_attribute must not be empty"),
            Self::NoScopeKinds => write!(f, "at least one scope kind is required"),
            Self::InvalidScopeKind { reason } => write!(f, "invalid scope kind: {reason}"),
        }
    }
}

impl Error for IndexConfigError {}
