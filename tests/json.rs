use taxonomy::{Taxonomy, TaxonomyError};

fn load() -> Taxonomy {
    let text = std::fs::read_to_string("tests/data/reparent.json").unwrap();
    Taxonomy::from_json(&text).unwrap()
}

#[test]
fn parses_node_link_json_into_a_tree() {
    let tax = load();
    assert_eq!(tax.root().unwrap().id, "1");
    assert_eq!(tax.len(), 5);
    assert_eq!(tax.get_or_fail("5").unwrap().parent.as_deref(), Some("4"));
}

#[test]
fn edit_node_reparents_and_updates_children_lists() {
    let mut tax = load();
    assert_eq!(tax.get_or_fail("5").unwrap().parent.as_deref(), Some("4"));

    tax.edit_node("5", Some("1"), None, None, None).unwrap();

    assert_eq!(tax.get_or_fail("5").unwrap().parent.as_deref(), Some("1"));
    let four_children: Vec<String> = tax.children("4").unwrap().into_iter().map(|n| n.id).collect();
    assert!(!four_children.contains(&"5".to_string()));
    let one_children: Vec<String> = tax.children("1").unwrap().into_iter().map(|n| n.id).collect();
    assert!(one_children.contains(&"5".to_string()));
}

#[test]
fn edit_node_rejects_a_cycle() {
    let mut tax = load();
    // "4" is an ancestor of "5"; reparenting "4" under "5" would create one.
    let err = tax.edit_node("4", Some("5"), None, None, None).unwrap_err();
    assert!(matches!(err, TaxonomyError::Cycle { .. }));
}

#[test]
fn directed_false_is_rejected() {
    let err = Taxonomy::from_json(r#"{"directed":false,"multigraph":false,"nodes":[],"links":[]}"#)
        .unwrap_err();
    assert!(matches!(err, TaxonomyError::InvalidFormat(_)));
}

#[test]
fn missing_root_is_detected() {
    // Every node has an outgoing edge, so there's no root candidate.
    let json = r#"{
        "directed": true, "multigraph": false,
        "nodes": [{"id": "a"}, {"id": "b"}],
        "links": [{"source": 0, "target": 1}, {"source": 1, "target": 0}]
    }"#;
    let err = Taxonomy::from_json(json).unwrap_err();
    assert!(matches!(err, TaxonomyError::MissingRoot));
}

#[test]
fn round_trips_through_node_link_json() {
    let tax = load();
    let json = tax.to_json_node_links();
    let back = Taxonomy::from_json(&json.to_string()).unwrap();
    assert_eq!(back.len(), tax.len());
    assert_eq!(back.root().unwrap().id, tax.root().unwrap().id);
}

#[test]
fn round_trips_through_node_link_json_after_a_removal() {
    // Tombstoning a node leaves a gap in the internal arena; the emitted
    // node-link JSON must renumber around it so source/target still index
    // into the (shorter) "nodes" array it actually emits.
    let mut tax = load();
    tax.remove_node("4").unwrap();

    let json = tax.to_json_node_links();
    assert_eq!(json["nodes"].as_array().unwrap().len(), tax.len());

    let back = Taxonomy::from_json(&json.to_string()).unwrap();
    assert_eq!(back.len(), tax.len());
    assert_eq!(back.root().unwrap().id, tax.root().unwrap().id);
    assert_eq!(back.get_or_fail("5").unwrap().parent, tax.get_or_fail("5").unwrap().parent);
}

#[test]
fn empty_taxonomy_round_trips_without_a_missing_root_error() {
    let tax = Taxonomy::from_json(r#"{"directed":true,"multigraph":false,"nodes":[],"links":[]}"#)
        .unwrap();
    let json = tax.to_json_node_links();
    let back = Taxonomy::from_json(&json.to_string()).unwrap();
    assert!(back.is_empty());
}
