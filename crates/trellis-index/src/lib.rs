//! Live identifier index over a configuration document.
//!
//! Running simulation components reach configuration nodes by their
//! `id` attribute. [`IdIndexBuilder`] walks the document once and wraps
//! every identifier-bearing node in a [`NodeProxy`] whose writable
//! fields are fixed at construction; [`IndexLookupService`] serves
//! lookups and keeps an [`AccessLedger`] of what was touched during the
//! current step.
//!
//! ```text
//! loader ──► ConfigDocument ──► IdIndexBuilder ──► IdIndex ─┐
//!                  ▲                                        ▼
//!                  └──── NodeProxy::set ◄── IndexLookupService::get ──► AccessLedger
//! ```
//!
//! The document is never owned here. Proxies, scopes and the ledger
//! hold [`NodeId`](trellis_core::NodeId) handles and slot numbers only.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod ledger;
pub mod proxy;
pub mod scope;
pub mod service;

pub use builder::{BuildReport, DuplicateId, IdIndex, IdIndexBuilder};
pub use config::{IndexConfig, IndexConfigError};
pub use ledger::AccessLedger;
pub use proxy::{NodeProxy, CONTENT_FIELD};
pub use scope::{ScopeRef, ScopeStack};
pub use service::{IndexLookupService, ModuleUpdate, ServiceState};
