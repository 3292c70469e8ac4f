//! Reusable configuration documents.
//!
//! - [`cell_sorting_document`]: a small but realistic cell-sorting
//!   configuration with every default scope kind and one unscoped id.
//! - [`flat_document`]: `n` unscoped identifier-bearing leaves.
//! - [`nested_scopes_document`]: a chain of nested `Plugin` scopes.

use trellis_doc::{ConfigDocument, DocumentBuilder};

/// Identifiers present in [`cell_sorting_document`], in document order.
pub const CELL_SORTING_IDS: [&str; 7] = [
    "temperature",
    "neighbor_order",
    "target_volume",
    "lambda_volume",
    "contact_condensing",
    "contact_medium",
    "debug_frequency",
];

/// A cell-sorting configuration.
///
/// ```text
/// CompuCell3D
/// ├── Potts
/// │   ├── Dimensions x=100 y=100 z=1
/// │   ├── Temperature id=temperature          "10.0"
/// │   └── NeighborOrder id=neighbor_order      "2"
/// ├── Plugin Name=Volume
/// │   ├── TargetVolume id=target_volume        "25"
/// │   └── LambdaVolume id=lambda_volume        "2.0"
/// ├── Plugin Name=Contact
/// │   ├── Energy id=contact_condensing Type1=Condensing Type2=Condensing  "2"
/// │   └── Energy id=contact_medium     Type1=Medium     Type2=Condensing  "16"
/// ├── Steppable Type=BlobInitializer
/// │   └── Region
/// │       └── Gap "0"
/// └── Metadata
///     └── DebugOutputFrequency id=debug_frequency value=10
/// ```
pub fn cell_sorting_document() -> ConfigDocument {
    DocumentBuilder::new()
        .open("CompuCell3D")
        .attr("Revision", "2")
        .open("Potts")
        .leaf("Dimensions", &[("x", "100"), ("y", "100"), ("z", "1")], "")
        .leaf("Temperature", &[("id", "temperature")], "10.0")
        .leaf("NeighborOrder", &[("id", "neighbor_order")], "2")
        .close()
        .open("Plugin")
        .attr("Name", "Volume")
        .leaf("TargetVolume", &[("id", "target_volume")], "25")
        .leaf("LambdaVolume", &[("id", "lambda_volume")], "2.0")
        .close()
        .open("Plugin")
        .attr("Name", "Contact")
        .leaf(
            "Energy",
            &[
                ("id", "contact_condensing"),
                ("Type1", "Condensing"),
                ("Type2", "Condensing"),
            ],
            "2",
        )
        .leaf(
            "Energy",
            &[
                ("id", "contact_medium"),
                ("Type1", "Medium"),
                ("Type2", "Condensing"),
            ],
            "16",
        )
        .close()
        .open("Steppable")
        .attr("Type", "BlobInitializer")
        .open("Region")
        .leaf("Gap", &[], "0")
        .close()
        .close()
        .open("Metadata")
        .leaf(
            "DebugOutputFrequency",
            &[("id", "debug_frequency"), ("value", "10")],
            "",
        )
        .close()
        .close()
        .finish()
        .expect("fixture document is balanced")
}

/// A root with `n` unscoped leaves `p0..p{n-1}`, each with `value="i"`.
pub fn flat_document(n: usize) -> ConfigDocument {
    let mut b = DocumentBuilder::new().open("Root");
    for i in 0..n {
        let id = format!("p{i}");
        let value = i.to_string();
        b = b.leaf("Param", &[("id", id.as_str()), ("value", value.as_str())], "");
    }
    b.close().finish().expect("fixture document is balanced")
}

/// `depth` nested `Plugin` scopes named `L0..L{depth-1}`, each holding
/// one parameter `lvl{i}` before opening the next level.
pub fn nested_scopes_document(depth: usize) -> ConfigDocument {
    let mut b = DocumentBuilder::new().open("Root");
    for i in 0..depth {
        let name = format!("L{i}");
        let id = format!("lvl{i}");
        b = b
            .open("Plugin")
            .attr("Name", &name)
            .leaf("Param", &[("id", id.as_str())], "");
    }
    for _ in 0..depth {
        b = b.close();
    }
    b.close().finish().expect("fixture document is balanced")
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::DocumentRead;

    #[test]
    fn cell_sorting_document_is_populated() {
        let doc = cell_sorting_document();
        assert_eq!(doc.name(doc.root().unwrap()), Some("CompuCell3D"));
        assert_eq!(doc.node_count(), 16);
    }

    #[test]
    fn flat_document_has_n_leaves() {
        let doc = flat_document(5);
        assert_eq!(doc.children(doc.root().unwrap()).len(), 5);
    }

    #[test]
    fn nested_document_depth() {
        let doc = nested_scopes_document(3);
        // Root + 3 * (Plugin + Param)
        assert_eq!(doc.node_count(), 7);
    }
}
