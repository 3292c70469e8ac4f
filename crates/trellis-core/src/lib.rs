//! Core types and traits for the Trellis configuration steering layer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Trellis workspace:
//! node and step identifiers, error types, and the document access
//! traits that every configuration tree implements.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod traits;

pub use error::{AssignmentError, DocumentError, StepError};
pub use id::{NodeId, StepId};
pub use traits::{DocumentRead, DocumentWrite, ModuleUpdater};
