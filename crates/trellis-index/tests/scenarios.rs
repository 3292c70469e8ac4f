//! End-to-end lookup scenarios over the fixture documents.

use trellis_core::{AssignmentError, DocumentRead};
use trellis_doc::DocumentBuilder;
use trellis_index::{IndexConfig, IndexLookupService, ServiceState};
use trellis_test_utils::fixtures::CELL_SORTING_IDS;
use trellis_test_utils::{cell_sorting_document, flat_document, nested_scopes_document};

fn service() -> IndexLookupService {
    IndexLookupService::new(IndexConfig::default()).unwrap()
}

#[test]
fn scoped_value_can_be_read_and_written() {
    let mut doc = DocumentBuilder::new()
        .open("CompuCell3D")
        .open("Plugin")
        .leaf("Param", &[("id", "c1"), ("value", "10")], "")
        .close()
        .close()
        .finish()
        .unwrap();
    let mut svc = service();
    svc.build(&doc);

    assert_eq!(svc.get("c1").unwrap().get("value"), Some("10"));
    svc.get("c1").unwrap().set(&mut doc, "value", "20").unwrap();
    let proxy = svc.get("c1").unwrap();
    assert_eq!(proxy.get("value"), Some("20"));
    assert!(proxy.is_dirty());
    assert!(matches!(
        proxy.set(&mut doc, "bogus", "x"),
        Err(AssignmentError::NotAssignable { .. })
    ));
}

#[test]
fn duplicate_identifier_resolves_to_later_node() {
    let doc = DocumentBuilder::new()
        .open("CompuCell3D")
        .leaf("X", &[("id", "dup")], "")
        .open("Plugin")
        .leaf("Y", &[("id", "dup")], "")
        .close()
        .close()
        .finish()
        .unwrap();
    let mut svc = service();
    let report = svc.build(&doc).clone();
    let proxy = svc.get("dup").unwrap();
    assert_eq!(doc.name(proxy.node()), Some("Y"));
    assert_eq!(report.duplicates.len(), 1);
}

#[test]
fn identifier_without_scope_builds_with_no_scope() {
    let doc = DocumentBuilder::new()
        .open("CompuCell3D")
        .leaf("Global", &[("id", "g")], "")
        .close()
        .finish()
        .unwrap();
    let mut svc = service();
    svc.build(&doc);
    assert_eq!(svc.state(), ServiceState::Ready);
    assert!(svc.get("g").unwrap().scope().is_none());
}

#[test]
fn cell_sorting_fixture_indexes_every_id_with_expected_scopes() {
    let doc = cell_sorting_document();
    let mut svc = service();
    let report = svc.build(&doc).clone();
    assert_eq!(svc.ids().collect::<Vec<_>>(), CELL_SORTING_IDS.to_vec());
    assert_eq!(report.unscoped, vec!["debug_frequency".to_string()]);

    let key = |svc: &IndexLookupService, id: &str| {
        svc.peek(id)
            .and_then(|p| p.scope())
            .map(|s| s.module_key.clone())
    };
    assert_eq!(key(&svc, "temperature").as_deref(), Some("Potts"));
    assert_eq!(key(&svc, "target_volume").as_deref(), Some("PluginVolume"));
    assert_eq!(key(&svc, "contact_medium").as_deref(), Some("PluginContact"));
    assert_eq!(key(&svc, "debug_frequency"), None);
}

#[test]
fn steering_a_step_reports_touched_modules() {
    let mut doc = cell_sorting_document();
    let mut svc = service();
    svc.build(&doc);

    svc.get("contact_medium")
        .unwrap()
        .set_content(&mut doc, 20)
        .unwrap();
    svc.get("temperature").unwrap().set_content(&mut doc, 15.5).unwrap();
    svc.get("target_volume");

    let touched: Vec<_> = svc.recently_accessed().keys().copied().collect();
    assert_eq!(touched, vec!["contact_medium", "temperature", "target_volume"]);

    let modules: Vec<_> = svc
        .pending_module_updates()
        .into_iter()
        .map(|u| u.scope.module_key)
        .collect();
    assert_eq!(modules, vec!["PluginContact", "Potts"]);

    let energy = svc.peek("contact_medium").unwrap().node();
    assert_eq!(doc.content(energy), Some("20"));

    svc.reset();
    assert!(svc.recently_accessed().is_empty());
    assert!(svc.pending_module_updates().is_empty());
}

#[test]
fn flat_document_is_fully_unscoped() {
    let doc = flat_document(50);
    let mut svc = service();
    let report = svc.build(&doc).clone();
    assert_eq!(report.indexed, 50);
    assert_eq!(report.unscoped.len(), 50);
    assert_eq!(svc.peek("p49").unwrap().get("value"), Some("49"));
}

#[test]
fn deeply_nested_scopes_resolve_to_innermost() {
    let doc = nested_scopes_document(6);
    let mut svc = service();
    svc.build(&doc);
    for i in 0..6 {
        let proxy = svc.peek(&format!("lvl{i}")).unwrap();
        assert_eq!(proxy.scope().unwrap().module_key, format!("PluginL{i}"));
    }
}

#[test]
fn removed_node_makes_old_proxy_detached_until_rebuild() {
    let mut doc = cell_sorting_document();
    let mut svc = service();
    svc.build(&doc);
    let node = svc.peek("lambda_volume").unwrap().node();
    doc.remove(node).unwrap();

    let err = svc
        .get("lambda_volume")
        .unwrap()
        .set_content(&mut doc, 3)
        .unwrap_err();
    assert!(matches!(err, AssignmentError::Detached { .. }));

    svc.build(&doc);
    assert!(svc.get("lambda_volume").is_none());
}
