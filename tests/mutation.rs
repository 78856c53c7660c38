use taxonomy::{Taxonomy, TaxonomyError};

fn load() -> Taxonomy {
    Taxonomy::from_newick("(A,B)R;").unwrap()
}

#[test]
fn add_node_appends_a_new_leaf() {
    let mut tax = load();
    let added = tax.add_node("A", "A1", "A child", "").unwrap();
    assert_eq!(added.parent.as_deref(), Some("A"));
    assert_eq!(tax.len(), 4);
    assert_eq!(tax.children("A").unwrap().len(), 1);
}

#[test]
fn add_node_rejects_a_duplicate_id() {
    let mut tax = load();
    let err = tax.add_node("A", "B", "dup", "").unwrap_err();
    assert!(matches!(err, TaxonomyError::DuplicateId(_)));
}

#[test]
fn remove_node_reparents_children_to_the_grandparent() {
    let mut tax = load();
    tax.add_node("A", "A1", "A child", "").unwrap();
    tax.remove_node("A").unwrap();

    assert!(tax.get("A").is_none());
    assert_eq!(tax.len(), 3);
    let root_children: Vec<String> = tax.children("R").unwrap().into_iter().map(|n| n.id).collect();
    assert!(root_children.contains(&"A1".to_string()));
    assert_eq!(tax.get_or_fail("A1").unwrap().parent.as_deref(), Some("R"));
}

#[test]
fn remove_node_refuses_to_remove_the_root() {
    let mut tax = load();
    assert!(tax.remove_node("R").is_err());
}

#[test]
fn removed_nodes_are_invisible_to_reads_but_len_still_matches_live_nodes() {
    let mut tax = load();
    tax.remove_node("A").unwrap();
    assert_eq!(tax.len(), 2);
    assert_eq!(tax.iterate().count(), 2);
    assert!(tax.get("A").is_none());
}

#[test]
fn clone_is_independent_of_the_original() {
    let tax = load();
    let mut cloned = tax.clone();
    cloned.remove_node("A").unwrap();

    assert_eq!(tax.len(), 3);
    assert_eq!(cloned.len(), 2);
    assert!(tax.get("A").is_some());
}

#[test]
fn rename_updates_the_name_index() {
    let mut tax = Taxonomy::from_json(
        r#"{"directed":true,"multigraph":false,
            "nodes":[{"id":"1","name":"root"},{"id":"2","name":"leaf"}],
            "links":[{"source":1,"target":0}]}"#,
    )
    .unwrap();

    tax.edit_node("2", None, None, Some("renamed"), None).unwrap();

    assert!(tax.find_all_by_name("leaf").is_empty());
    assert_eq!(tax.find_all_by_name("renamed").len(), 1);
}
