//! Property tests over randomly shaped configuration trees.
//!
//! Trees mix the three default scope kinds with plain elements and draw
//! identifiers from a small pool so duplicates are common.

use std::collections::HashMap;

use proptest::prelude::*;
use trellis_core::{AssignmentError, DocumentRead, NodeId};
use trellis_doc::{ConfigDocument, DocumentBuilder};
use trellis_index::{IndexConfig, IndexLookupService, CONTENT_FIELD};

const NAMES: [&str; 5] = ["Potts", "Plugin", "Steppable", "Group", "Param"];

#[derive(Clone, Debug)]
struct Shape {
    name: &'static str,
    id: Option<u8>,
    value: u8,
    children: Vec<Shape>,
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = (0..NAMES.len(), prop::option::of(0u8..6), any::<u8>()).prop_map(
        |(n, id, value)| Shape {
            name: NAMES[n],
            id,
            value,
            children: Vec::new(),
        },
    );
    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            0..NAMES.len(),
            prop::option::of(0u8..6),
            any::<u8>(),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(n, id, value, children)| Shape {
                name: NAMES[n],
                id,
                value,
                children,
            })
    })
}

fn emit(b: DocumentBuilder, shape: &Shape) -> DocumentBuilder {
    let mut b = b.open(shape.name);
    if let Some(id) = shape.id {
        b = b.attr("id", &format!("n{id}"));
    }
    b = b.attr("value", &shape.value.to_string());
    for child in &shape.children {
        b = emit(b, child);
    }
    b.close()
}

fn arb_doc() -> impl Strategy<Value = ConfigDocument> {
    prop::collection::vec(arb_shape(), 0..5).prop_map(|top| {
        let mut b = DocumentBuilder::new().open("CompuCell3D");
        for shape in &top {
            b = emit(b, shape);
        }
        b.close().finish().expect("generated tree is balanced")
    })
}

/// Last pre-order occurrence of every identifier, excluding the root.
fn expected_winners(doc: &ConfigDocument) -> HashMap<String, NodeId> {
    let root = doc.root();
    doc.preorder()
        .into_iter()
        .filter(|&n| Some(n) != root)
        .filter_map(|n| doc.attribute(n, "id").map(|id| (id.to_string(), n)))
        .collect()
}

/// Nearest strict ancestor whose name is a default scope kind.
fn expected_scope(doc: &ConfigDocument, node: NodeId, cfg: &IndexConfig) -> Option<NodeId> {
    let mut cursor = doc.parent(node);
    while let Some(p) = cursor {
        if cfg.is_scope_kind(doc.name(p)?) {
            return Some(p);
        }
        cursor = doc.parent(p);
    }
    None
}

fn service_for(doc: &ConfigDocument) -> IndexLookupService {
    let mut svc = IndexLookupService::new(IndexConfig::default()).unwrap();
    svc.build(doc);
    svc
}

proptest! {
    #[test]
    fn every_identifier_resolves_to_last_occurrence(doc in arb_doc()) {
        let mut svc = service_for(&doc);
        let winners = expected_winners(&doc);
        prop_assert_eq!(svc.len(), winners.len());
        for (id, node) in &winners {
            let proxy = svc.get(id).expect("indexed");
            prop_assert_eq!(proxy.node(), *node);
            prop_assert_eq!(proxy.get("value"), doc.attribute(*node, "value"));
            prop_assert_eq!(proxy.get(CONTENT_FIELD), doc.content(*node));
        }
    }

    #[test]
    fn scope_follows_structural_nesting(doc in arb_doc()) {
        let cfg = IndexConfig::default();
        let svc = service_for(&doc);
        for (id, node) in expected_winners(&doc) {
            let proxy = svc.peek(&id).expect("indexed");
            prop_assert_eq!(
                proxy.scope().map(|s| s.node),
                expected_scope(&doc, node, &cfg)
            );
        }
    }

    #[test]
    fn assignable_writes_round_trip(doc in arb_doc(), v in any::<u16>()) {
        let mut doc = doc;
        let mut svc = service_for(&doc);
        let ids: Vec<String> = svc.ids().map(str::to_string).collect();
        for id in &ids {
            let proxy = svc.get(id).expect("indexed");
            let fields: Vec<String> = proxy.fields().map(str::to_string).collect();
            for field in &fields {
                proxy.set(&mut doc, field, v).unwrap();
                let text = v.to_string();
                prop_assert_eq!(proxy.get(field), Some(text.as_str()));
                prop_assert!(proxy.is_dirty());
            }
        }
    }

    #[test]
    fn unassignable_writes_fail_and_leave_dirty_alone(
        doc in arb_doc(),
        dirty_first in any::<bool>(),
    ) {
        let mut doc = doc;
        let mut svc = service_for(&doc);
        let ids: Vec<String> = svc.ids().map(str::to_string).collect();
        for id in &ids {
            let proxy = svc.get(id).expect("indexed");
            if dirty_first {
                proxy.set(&mut doc, "value", 1).unwrap();
            }
            let before = proxy.is_dirty();
            let err = proxy.set(&mut doc, "not_a_field", 1);
            let rejected = matches!(err, Err(AssignmentError::NotAssignable { .. }));
            prop_assert!(rejected);
            prop_assert_eq!(proxy.is_dirty(), before);
        }
    }

    #[test]
    fn reset_always_empties_ledger(
        doc in arb_doc(),
        probes in prop::collection::vec(0u8..8, 0..16),
    ) {
        let mut svc = service_for(&doc);
        for p in probes {
            svc.get(&format!("n{p}"));
        }
        svc.reset();
        prop_assert!(svc.recently_accessed().is_empty());
    }
}
