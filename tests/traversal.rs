use taxonomy::Taxonomy;

fn ncbi() -> Taxonomy {
    Taxonomy::from_ncbi_files(
        "tests/data/ncbi_subset/nodes.dmp",
        "tests/data/ncbi_subset/names.dmp",
    )
    .unwrap()
}

#[test]
fn lca_of_zero_ids_is_none() {
    let tax = ncbi();
    assert!(tax.lca(&[]).unwrap().is_none());
}

#[test]
fn lca_of_one_id_is_itself() {
    let tax = ncbi();
    let lca = tax.lca(&["562"]).unwrap().unwrap();
    assert_eq!(lca.id, "562");
}

#[test]
fn lca_with_the_root_is_the_root() {
    let tax = ncbi();
    let lca = tax.lca(&["1", "562"]).unwrap().unwrap();
    assert_eq!(lca.id, "1");
}

#[test]
fn lca_is_commutative() {
    let tax = ncbi();
    let a = tax.lca(&["562", "91347"]).unwrap().unwrap();
    let b = tax.lca(&["91347", "562"]).unwrap().unwrap();
    assert_eq!(a.id, b.id);
}

#[test]
fn lca_is_associative_over_three_inputs() {
    let tax = ncbi();
    // lca(lca(562, 91347), 1224) == lca(562, lca(91347, 1224))
    let left_inner = tax.lca(&["562", "91347"]).unwrap().unwrap();
    let left = tax.lca(&[left_inner.id.as_str(), "1224"]).unwrap().unwrap();
    let right_inner = tax.lca(&["91347", "1224"]).unwrap().unwrap();
    let right = tax.lca(&["562", right_inner.id.as_str()]).unwrap().unwrap();
    assert_eq!(left.id, right.id);
    assert_eq!(tax.lca(&["562", "91347", "1224"]).unwrap().unwrap().id, left.id);
}

#[test]
fn lca_of_unknown_id_errors() {
    let tax = ncbi();
    assert!(tax.lca(&["562", "nope"]).is_err());
}

#[test]
fn parent_at_rank_walks_up_to_the_requested_rank() {
    let tax = ncbi();
    let genus = tax.parent_at_rank("562", "genus").unwrap().unwrap();
    assert_eq!(genus.id, "561");
    let superkingdom = tax.parent_at_rank("562", "superkingdom").unwrap().unwrap();
    assert_eq!(superkingdom.id, "2");
}

#[test]
fn parent_at_rank_of_own_rank_is_the_node_itself() {
    let tax = ncbi();
    let species = tax.parent_at_rank("562", "species").unwrap().unwrap();
    assert_eq!(species.id, "562");
}

#[test]
fn parent_at_rank_with_no_matching_ancestor_is_none() {
    let tax = ncbi();
    assert!(tax.parent_at_rank("562", "kingdom").unwrap().is_none());
}

#[test]
fn single_node_taxonomy_has_empty_parents_and_children() {
    let tax = Taxonomy::from_newick("R;").unwrap();
    assert_eq!(tax.lineage("R").unwrap().len(), 1);
    assert!(tax.parents("R").unwrap().is_empty());
    assert!(tax.children("R").unwrap().is_empty());
    assert!(tax.parent("R").unwrap().is_none());
}
