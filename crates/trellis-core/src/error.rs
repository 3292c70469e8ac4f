//! Error types for the Trellis steering layer.
//!
//! Organized by subsystem: document access, proxy assignment, and the
//! step loop. A lookup miss is not an error anywhere in this crate; it
//! is always reported as `None`.

use std::error::Error;
use std::fmt;

use crate::id::NodeId;

/// Errors from reading or writing a configuration document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentError {
    /// The handle does not name a node in this document.
    NodeNotFound {
        /// The dangling handle.
        node: NodeId,
    },
    /// The builder was closed more times than it was opened, or finished
    /// with elements still open.
    Unbalanced {
        /// Description of the imbalance.
        reason: String,
    },
    /// The builder finished without ever opening a root element.
    NoRoot,
    /// Every node handle has been handed out. Slots are never reused,
    /// so this counts removed nodes too.
    CapacityExceeded,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { node } => write!(f, "node {node} not found in document"),
            Self::Unbalanced { reason } => write!(f, "unbalanced document: {reason}"),
            Self::NoRoot => write!(f, "document has no root element"),
            Self::CapacityExceeded => write!(f, "document node handles exhausted"),
        }
    }
}

impl Error for DocumentError {}

/// Errors from assigning a field through a node proxy.
///
/// Fatal to the single `set` call only. The proxy's local value and
/// dirty flag are left exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignmentError {
    /// The field was not present on the node when the proxy was built.
    NotAssignable {
        /// The rejected field name.
        field: String,
        /// The proxy's fixed assignable set, in document order.
        allowed: Vec<String>,
    },
    /// The proxy's backing node is no longer in the document.
    Detached {
        /// Identifier the proxy was indexed under.
        id: String,
        /// The dangling backing handle.
        node: NodeId,
    },
}

impl fmt::Display for AssignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAssignable { field, allowed } => write!(
                f,
                "field '{field}' is not assignable; assignable fields are [{}]",
                allowed.join(", ")
            ),
            Self::Detached { id, node } => {
                write!(f, "proxy '{id}' lost its backing node {node}")
            }
        }
    }
}

impl Error for AssignmentError {}

/// Errors from the steering loop during `step()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A steppable attempted an assignment that was rejected.
    Steppable {
        /// Name of the offending steppable.
        name: String,
        /// The rejected assignment.
        reason: AssignmentError,
    },
    /// The external engine refused to re-initialise a module.
    ModuleUpdateFailed {
        /// Composite key of the module (e.g. `PluginVolume`).
        module: String,
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The configured step budget has been exhausted.
    Finished,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Steppable { name, reason } => {
                write!(f, "steppable '{name}' failed: {reason}")
            }
            Self::ModuleUpdateFailed { module, reason } => {
                write!(f, "module '{module}' update failed: {reason}")
            }
            Self::Finished => write!(f, "step budget exhausted"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Steppable { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_assignable_lists_allowed_fields() {
        let e = AssignmentError::NotAssignable {
            field: "bogus".into(),
            allowed: vec!["id".into(), "value".into(), "cdata".into()],
        };
        assert_eq!(
            e.to_string(),
            "field 'bogus' is not assignable; assignable fields are [id, value, cdata]"
        );
    }

    #[test]
    fn detached_mentions_handle() {
        let e = AssignmentError::Detached {
            id: "c1".into(),
            node: NodeId(4),
        };
        assert_eq!(e.to_string(), "proxy 'c1' lost its backing node 4");
    }

    #[test]
    fn capacity_exceeded_reads_plainly() {
        assert_eq!(
            DocumentError::CapacityExceeded.to_string(),
            "document node handles exhausted"
        );
    }

    #[test]
    fn step_error_exposes_assignment_source() {
        let e = StepError::Steppable {
            name: "steer".into(),
            reason: AssignmentError::Detached {
                id: "c1".into(),
                node: NodeId(0),
            },
        };
        assert!(e.source().is_some());
        assert!(StepError::Finished.source().is_none());
    }
}
