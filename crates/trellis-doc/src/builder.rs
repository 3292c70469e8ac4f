//! Programmatic construction of [`ConfigDocument`]s.
//!
//! A loader translates its source format into a balanced sequence of
//! `open`/`close` calls. The builder records the first structural error
//! and reports it from [`finish()`](DocumentBuilder::finish), so call
//! chains stay fluent.

use trellis_core::{DocumentError, DocumentWrite, NodeId};

use crate::document::ConfigDocument;

/// Fluent builder for a [`ConfigDocument`].
///
/// # Example
///
/// ```
/// use trellis_core::DocumentRead;
/// use trellis_doc::DocumentBuilder;
///
/// let doc = DocumentBuilder::new()
///     .open("CompuCell3D")
///     .open("Plugin")
///     .attr("Name", "Volume")
///     .leaf("TargetVolume", &[("id", "tv")], "25")
///     .close()
///     .close()
///     .finish()
///     .unwrap();
/// assert_eq!(doc.node_count(), 3);
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: ConfigDocument,
    open: Vec<NodeId>,
    root_closed: bool,
    error: Option<DocumentError>,
}

impl DocumentBuilder {
    /// Start an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new element as a child of the innermost open element.
    pub fn open(mut self, name: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.root_closed {
            self.error = Some(DocumentError::Unbalanced {
                reason: format!("element '{name}' opened after the root was closed"),
            });
            return self;
        }
        let parent = self.open.last().copied();
        match self.doc.alloc(name, parent) {
            Ok(id) => self.open.push(id),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Set an attribute on the innermost open element.
    pub fn attr(mut self, key: &str, value: &str) -> Self {
        if let Some(node) = self.current("attr") {
            self.record(|doc| doc.update_attributes(node, &[(key, value)]));
        }
        self
    }

    /// Set the free-text content of the innermost open element.
    pub fn content(mut self, text: &str) -> Self {
        if let Some(node) = self.current("content") {
            self.record(|doc| doc.set_content(node, text));
        }
        self
    }

    /// Close the innermost open element.
    pub fn close(mut self) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.open.pop().is_none() {
            self.error = Some(DocumentError::Unbalanced {
                reason: "close() without a matching open()".to_string(),
            });
        } else if self.open.is_empty() {
            self.root_closed = true;
        }
        self
    }

    /// Open, populate, and close a childless element in one call.
    pub fn leaf(self, name: &str, attrs: &[(&str, &str)], text: &str) -> Self {
        let mut b = self.open(name);
        for (k, v) in attrs {
            b = b.attr(k, v);
        }
        if !text.is_empty() {
            b = b.content(text);
        }
        b.close()
    }

    /// Finish building.
    ///
    /// # Errors
    ///
    /// [`DocumentError::NoRoot`] if nothing was opened, or
    /// [`DocumentError::Unbalanced`] for the first structural mistake or
    /// for elements left open. [`DocumentError::CapacityExceeded`] if the
    /// document ran out of node handles.
    pub fn finish(self) -> Result<ConfigDocument, DocumentError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        if !self.open.is_empty() {
            return Err(DocumentError::Unbalanced {
                reason: format!("{} element(s) left open", self.open.len()),
            });
        }
        if !self.root_closed {
            return Err(DocumentError::NoRoot);
        }
        Ok(self.doc)
    }

    fn current(&mut self, what: &str) -> Option<NodeId> {
        if self.error.is_some() {
            return None;
        }
        let top = self.open.last().copied();
        if top.is_none() {
            self.error = Some(DocumentError::Unbalanced {
                reason: format!("{what}() with no open element"),
            });
        }
        top
    }

    fn record(&mut self, f: impl FnOnce(&mut ConfigDocument) -> Result<(), DocumentError>) {
        if let Err(e) = f(&mut self.doc) {
            self.error = Some(e);
        }
    }
}
