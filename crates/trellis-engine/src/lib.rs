//! Step loop for steering a running simulation through its configuration.
//!
//! [`SteeringLoop`] owns the loaded [`ConfigDocument`](trellis_doc::ConfigDocument)
//! and its [`IndexLookupService`](trellis_index::IndexLookupService). Each
//! [`step()`](SteeringLoop::step) runs the registered [`Steppable`]s,
//! hands every module they changed to the [`ModuleUpdater`](trellis_core::ModuleUpdater),
//! and clears the access ledger before returning.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod steering;
pub mod steppable;

pub use config::{ConfigError, SteeringConfig};
pub use metrics::StepMetrics;
pub use steering::SteeringLoop;
pub use steppable::{SteerContext, Steppable};
