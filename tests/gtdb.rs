use taxonomy::Taxonomy;

fn load() -> Taxonomy {
    let text = std::fs::read_to_string("tests/data/gtdb_subset.tsv").unwrap();
    Taxonomy::from_gtdb(&text).unwrap()
}

#[test]
fn root_is_the_domain_token() {
    let tax = load();
    let root = tax.root().unwrap();
    assert_eq!(root.id, "d__Bacteria");
    assert_eq!(root.rank, "domain");
}

#[test]
fn shared_lineage_prefix_is_merged_into_one_chain() {
    let tax = load();
    // Both rows share everything down to family; only genus/species diverge.
    let family = tax.get_or_fail("f__Enterobacteriaceae").unwrap();
    assert_eq!(tax.children(&family.id).unwrap().len(), 2);
}

#[test]
fn species_leaves_have_distinct_lineages() {
    let tax = load();
    let ecoli = tax.lineage("s__Escherichia coli").unwrap();
    let senterica = tax.lineage("s__Salmonella enterica").unwrap();
    assert_eq!(ecoli.len(), 7);
    assert_eq!(senterica.len(), 7);
    assert_eq!(ecoli[4].id, "c__Gammaproteobacteria");
    assert_eq!(senterica[4].id, "c__Gammaproteobacteria");
    assert_ne!(ecoli[0].id, senterica[0].id);
}

#[test]
fn lineage_column_is_located_even_with_a_non_conforming_header() {
    // The fixture's header row does not start with d__; parsing must skip
    // it rather than mistaking it for malformed lineage data.
    let tax = load();
    assert_eq!(tax.len(), 9);
}

#[test]
fn unprefixed_token_is_a_format_error() {
    let err = Taxonomy::from_gtdb("acc\tlineage\nrow1\tBacteria;p__Proteobacteria\n").unwrap_err();
    assert!(matches!(err, taxonomy::TaxonomyError::InvalidFormat(_)));
}
