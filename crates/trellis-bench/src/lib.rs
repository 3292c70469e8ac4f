//! Benchmark documents for the Trellis configuration index.
//!
//! - [`random_document`]: a seeded random tree mixing scope kinds and
//!   plain elements, with identifiers on about half of the nodes
//! - [`reference_document`]: the 10K-node profile used by the benches
//! - [`document_ids`]: every identifier in a document, in pre-order

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use trellis_core::{DocumentRead, DocumentWrite, NodeId};
use trellis_doc::{ConfigDocument, DocumentBuilder};

const NAMES: [&str; 6] = ["Potts", "Plugin", "Steppable", "Group", "Param", "Energy"];

fn pick(rng: &mut ChaCha8Rng, n: usize) -> usize {
    (rng.next_u64() % n as u64) as usize
}

/// Build a random document with `nodes` elements below the root.
///
/// Each new element attaches to a uniformly chosen existing one, which
/// gives shallow, bushy trees similar to real configurations. Identifier
/// values are drawn from `0..nodes`, so some collide.
pub fn random_document(seed: u64, nodes: usize) -> ConfigDocument {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut doc = DocumentBuilder::new()
        .open("CompuCell3D")
        .close()
        .finish()
        .expect("single root is balanced");
    let root = doc.root().expect("document has a root");
    let mut live: Vec<NodeId> = vec![root];

    for i in 0..nodes {
        let parent = live[pick(&mut rng, live.len())];
        let name = NAMES[pick(&mut rng, NAMES.len())];
        let node = doc.append_child(parent, name).expect("parent is live");

        let mut attrs: Vec<(String, String)> = Vec::new();
        if name == "Plugin" {
            attrs.push(("Name".to_string(), format!("M{i}")));
        }
        if rng.next_u32() % 2 == 0 {
            attrs.push(("id".to_string(), format!("p{}", pick(&mut rng, nodes.max(1)))));
        }
        attrs.push(("value".to_string(), i.to_string()));
        let borrowed: Vec<(&str, &str)> = attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        doc.update_attributes(node, &borrowed).expect("node is live");
        doc.set_content(node, &i.to_string()).expect("node is live");
        live.push(node);
    }
    doc
}

/// The 10K-node reference profile.
pub fn reference_document() -> ConfigDocument {
    random_document(42, 10_000)
}

/// Identifiers in pre-order, with duplicates.
pub fn document_ids(doc: &ConfigDocument) -> Vec<String> {
    doc.preorder()
        .into_iter()
        .filter_map(|n| doc.attribute(n, "id").map(str::to_string))
        .collect()
}
