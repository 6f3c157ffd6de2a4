mod common;

use std::collections::BTreeSet;

use ontograph_core::model::{BacktraceRow, CrossMappingRow, FullpathRow, TermRow};
use ontograph_core::{GraphLoader, QueryError, TermGraphStore, TsvDirectory};

use common::{config_for, fixture_dir};

fn fixture_store() -> TermGraphStore {
    let dir = fixture_dir();
    let config = config_for(dir.path());
    GraphLoader::load_from(&TsvDirectory::new(dir.path()), &config).unwrap()
}

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn test_ancestors_across_all_positions() {
    let store = fixture_store();
    let ancestors = store.ancestry().ancestors_of_term("MP:0004084");
    assert_eq!(
        ancestors,
        set(&["MP:0005385", "MP:0002127", "MP:0000266", "MP:0001544"])
    );
}

#[test]
fn test_no_term_is_its_own_ancestor() {
    let store = fixture_store();
    let resolver = store.ancestry();
    for term in store.terms() {
        let ancestors = resolver.ancestors_of_term(&term.id);
        assert!(!ancestors.contains(&term.id), "{} lists itself", term.id);
        assert!(!ancestors.contains(store.root_term()));
    }
}

#[test]
fn test_ancestors_of_unknown_term_are_empty() {
    let store = fixture_store();
    assert!(store.ancestry().ancestors_of_term("MP:9999999").is_empty());
    assert!(store.ancestry().ancestors_of_term("MP:0005385").is_empty());
}

#[test]
fn test_cyclic_ancestor_rows_terminate() {
    let mut loader = GraphLoader::with_root("X:0");
    loader
        .load_terms(vec![TermRow::new("X:A", "1"), TermRow::new("X:B", "2")])
        .unwrap();
    loader
        .load_ancestors(vec![
            BacktraceRow::new(1, "2 1"),
            BacktraceRow::new(2, "1 2"),
            BacktraceRow::new(1, "1 1 2 1"),
        ])
        .unwrap();
    let store = loader.finish().unwrap();

    assert_eq!(store.ancestry().ancestors_of_term("X:A"), set(&["X:B"]));
    assert_eq!(store.ancestry().ancestors_of_term("X:B"), set(&["X:A"]));
}

#[test]
fn test_parents_and_top_level() {
    let store = fixture_store();
    let resolver = store.ancestry();
    assert_eq!(
        resolver.parents_of_term("MP:0004084"),
        set(&["MP:0000266", "MP:0001544"])
    );
    assert_eq!(
        resolver.top_level_terms(),
        set(&["MP:0005385", "MP:0005376"])
    );
}

#[test]
fn test_top_levels_and_intermediates_across_positions() {
    let store = fixture_store();
    let resolver = store.ancestry();

    assert_eq!(resolver.top_levels_of_term("MP:0005598"), set(&["MP:0005385"]));
    assert_eq!(
        resolver.intermediates_of_term("MP:0005598"),
        set(&["MP:0002127", "MP:0000266", "MP:0004084", "MP:0001544"])
    );
    assert_eq!(resolver.top_levels_of_term("MP:0005376"), set(&["MP:0005376"]));
    assert!(resolver.intermediates_of_term("MP:0005376").is_empty());
    assert!(resolver.top_levels_of_term("MP:0000001").is_empty());
}

#[test]
fn test_descendant_graphs_in_row_order() {
    let store = fixture_store();
    let graphs = store.descendants().descendant_graphs("MP:0005385").unwrap();
    assert_eq!(graphs.len(), 8);
    assert_eq!(graphs[0].term_ids, vec!["MP:0005385", "MP:0002127"]);
    assert_eq!(
        graphs[3].term_ids,
        vec!["MP:0005385", "MP:0002127", "MP:0000266", "MP:0004084", "MP:0005598"]
    );
    assert_eq!(graphs[7].leaf(), Some("MP:0003137"));
}

#[test]
fn test_paths_collapsing_to_same_terms_appear_once() {
    let store = fixture_store();
    let graphs = store.descendants().descendant_graphs("MP:0004084").unwrap();
    assert_eq!(graphs.len(), 1);
    assert_eq!(graphs[0].term_ids, vec!["MP:0004084", "MP:0005598"]);
}

#[test]
fn test_no_nodes_is_no_graph() {
    let store = fixture_store();
    let resolver = store.descendants();
    assert_eq!(
        resolver.descendant_graphs("MP:9999999"),
        Err(QueryError::NoGraph("MP:9999999".to_string()))
    );
    assert!(matches!(
        resolver.descendant_graphs("MP:0000001"),
        Err(QueryError::NoGraph(_))
    ));
}

#[test]
fn test_leaf_term_has_no_descendants() {
    let store = fixture_store();
    assert_eq!(store.descendants().descendant_graphs("MP:0003137"), Ok(vec![]));
    assert_eq!(
        store.descendants().descendant_term_ids("MP:0003137"),
        Ok(BTreeSet::new())
    );
}

#[test]
fn test_descendant_term_ids() {
    let store = fixture_store();
    let below = store.descendants().descendant_term_ids("MP:0001544").unwrap();
    assert_eq!(below, set(&["MP:0004084", "MP:0005598", "MP:0003137"]));
}

#[test]
fn test_duplicate_rows_reported_once_in_row_order() {
    let mut loader = GraphLoader::with_root("X:0");
    loader
        .load_terms(vec![
            TermRow::new("X:A", "1,2"),
            TermRow::new("X:B", "3"),
            TermRow::new("X:C", "4"),
        ])
        .unwrap();
    loader
        .load_descendants(vec![
            FullpathRow::new(2, "2 4"),
            FullpathRow::new(1, "1 3"),
            FullpathRow::new(1, "1 3"),
        ])
        .unwrap();
    let store = loader.finish().unwrap();

    let graphs = store.descendants().descendant_graphs("X:A").unwrap();
    let got: Vec<Vec<String>> = graphs.into_iter().map(|p| p.term_ids).collect();
    assert_eq!(got, vec![vec!["X:A", "X:C"], vec!["X:A", "X:B"]]);
}

#[test]
fn test_cross_mapping_label_filter() {
    let mut loader = GraphLoader::with_root("MP:0000001");
    loader.load_terms(vec![TermRow::new("MP:1", "1")]).unwrap();
    loader
        .load_cross_ontology_mapping(
            vec![
                CrossMappingRow::new("MP:1", "MA:10", "MA"),
                CrossMappingRow::new("MP:1", "UB:20", "UBERON"),
            ],
            "MA",
        )
        .unwrap();
    let store = loader.finish().unwrap();

    assert_eq!(store.overlay().cross_mapping_of("MP:1"), &["MA:10".to_string()]);
}

#[test]
fn test_overlays_from_fixture() {
    let store = fixture_store();
    let overlay = store.overlay();

    assert_eq!(
        overlay.synonyms_of("MP:0000266"),
        &[
            "heart abnormalities".to_string(),
            "abnormal cardiac morphology".to_string()
        ]
    );
    assert_eq!(
        overlay.alternate_ids_of("MP:0000266"),
        &set(&["MP:0000267", "MP:0002126"])
    );
    assert_eq!(overlay.resolve_id("MP:0000267"), Some("MP:0000266"));
    assert_eq!(overlay.term_for_alternate_id("MP:0005600"), Some("MP:0005598"));
    assert_eq!(overlay.cross_mapping_of("MP:0004084"), &["MA:0000164".to_string()]);
}

#[test]
fn test_term_view_serializes() {
    let store = fixture_store();
    let view = store.overlay().term_view("MP:0000266").unwrap();
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["id"], "MP:0000266");
    assert_eq!(json["nodes"], serde_json::json!([4]));
    assert_eq!(json["cross_mappings"]["MA"], serde_json::json!(["MA:0000072"]));
    assert_eq!(json["synonyms"].as_array().unwrap().len(), 2);
    assert_eq!(json["top_levels"], serde_json::json!(["MP:0005385"]));
    assert_eq!(json["intermediates"], serde_json::json!(["MP:0002127"]));
}
