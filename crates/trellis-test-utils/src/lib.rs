//! Test utilities and fixture documents for Trellis development.
//!
//! Provides representative configuration documents ([`fixtures`]) and
//! mock implementations of [`ModuleUpdater`] for exercising the
//! steering loop without a native engine.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{cell_sorting_document, flat_document, nested_scopes_document};

use trellis_core::{DocumentRead, ModuleUpdater, NodeId, StepError};

/// Mock [`ModuleUpdater`] that records every call.
///
/// Each entry is `(module_key, scope node, scope element name)`, captured
/// at call time so tests can assert dispatch order.
#[derive(Debug, Default)]
pub struct RecordingUpdater {
    pub calls: Vec<(String, NodeId, String)>,
}

impl RecordingUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Module keys in dispatch order.
    pub fn module_keys(&self) -> Vec<&str> {
        self.calls.iter().map(|(k, _, _)| k.as_str()).collect()
    }
}

impl ModuleUpdater for RecordingUpdater {
    fn update_module(
        &mut self,
        module_key: &str,
        scope: NodeId,
        doc: &dyn DocumentRead,
    ) -> Result<(), StepError> {
        let kind = doc.name(scope).unwrap_or_default().to_string();
        self.calls.push((module_key.to_string(), scope, kind));
        Ok(())
    }
}

/// Mock [`ModuleUpdater`] that rejects one module by key.
#[derive(Debug)]
pub struct RejectingUpdater {
    pub reject: String,
    pub accepted: Vec<String>,
}

impl RejectingUpdater {
    pub fn new(reject: impl Into<String>) -> Self {
        Self {
            reject: reject.into(),
            accepted: Vec::new(),
        }
    }
}

impl ModuleUpdater for RejectingUpdater {
    fn update_module(
        &mut self,
        module_key: &str,
        _scope: NodeId,
        _doc: &dyn DocumentRead,
    ) -> Result<(), StepError> {
        if module_key == self.reject {
            return Err(StepError::ModuleUpdateFailed {
                module: module_key.to_string(),
                reason: "rejected by test updater".to_string(),
            });
        }
        self.accepted.push(module_key.to_string());
        Ok(())
    }
}

/// Mock [`ModuleUpdater`] that accepts everything and remembers nothing.
#[derive(Debug, Default)]
pub struct NullUpdater;

impl ModuleUpdater for NullUpdater {
    fn update_module(
        &mut self,
        _module_key: &str,
        _scope: NodeId,
        _doc: &dyn DocumentRead,
    ) -> Result<(), StepError> {
        Ok(())
    }
}
