//! Arena-backed in-memory configuration documents.
//!
//! [`ConfigDocument`] is the concrete tree that loaders hand to the
//! index. Nodes live in a flat arena and are addressed by
//! [`NodeId`](trellis_core::NodeId), so handles held elsewhere never
//! own any part of the tree. [`DocumentBuilder`] is the programmatic
//! loader API; turning text into builder calls is the loader's job.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod document;

pub use builder::DocumentBuilder;
pub use document::ConfigDocument;
