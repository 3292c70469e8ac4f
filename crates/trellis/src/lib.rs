//! Trellis: a live identifier index for steering simulation configuration.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Trellis sub-crates. For most users, adding `trellis` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! let mut doc = DocumentBuilder::new()
//!     .open("CompuCell3D")
//!     .open("Plugin")
//!     .attr("Name", "Volume")
//!     .leaf("TargetVolume", &[("id", "c1"), ("value", "10")], "")
//!     .close()
//!     .close()
//!     .finish()
//!     .unwrap();
//!
//! let mut index = IndexLookupService::new(IndexConfig::default()).unwrap();
//! index.build(&doc);
//!
//! let proxy = index.get("c1").unwrap();
//! assert_eq!(proxy.get("value"), Some("10"));
//! proxy.set(&mut doc, "value", 20).unwrap();
//! assert!(proxy.is_dirty());
//!
//! let updates = index.pending_module_updates();
//! assert_eq!(updates[0].scope.module_key, "PluginVolume");
//! index.reset();
//! assert!(index.recently_accessed().is_empty());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `trellis-core` | Handles, errors, document and updater traits |
//! | [`doc`] | `trellis-doc` | Arena-backed documents and the builder |
//! | [`index`] | `trellis-index` | Scope stack, proxies, index builder, lookup service |
//! | [`engine`] | `trellis-engine` | Steppables and the steering loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core handles, errors, and traits (`trellis-core`).
pub use trellis_core as types;

/// Configuration documents (`trellis-doc`).
///
/// [`doc::DocumentBuilder`] turns a loader's open/close events into a
/// [`doc::ConfigDocument`].
pub use trellis_doc as doc;

/// Identifier index and lookup service (`trellis-index`).
pub use trellis_index as index;

/// Steering loop (`trellis-engine`).
///
/// Implement [`engine::Steppable`] and run it with [`engine::SteeringLoop`].
pub use trellis_engine as engine;

/// Common imports for typical Trellis usage.
///
/// ```rust
/// use trellis::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use trellis_core::{DocumentRead, DocumentWrite, ModuleUpdater, NodeId, StepId};

    // Errors
    pub use trellis_core::{AssignmentError, DocumentError, StepError};

    // Documents
    pub use trellis_doc::{ConfigDocument, DocumentBuilder};

    // Index
    pub use trellis_index::{
        BuildReport, IndexConfig, IndexLookupService, ModuleUpdate, NodeProxy, ScopeRef,
        CONTENT_FIELD,
    };

    // Engine
    pub use trellis_engine::{
        ConfigError, SteerContext, SteeringConfig, SteeringLoop, StepMetrics, Steppable,
    };
}
