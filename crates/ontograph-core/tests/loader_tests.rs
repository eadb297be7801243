use std::fs;
use std::path::Path;

use ontograph_core::{OntologyError, OntologyLoader, RelationType, TermContainer};
use tempfile::TempDir;

const TERMS: &str = "\
! id\tname\tobsolete
GO:0008150\tbiological_process\tN
GO:0009987\tcellular process\tN
GO:0006915\tapoptotic process\tN
GO:0012501\tprogrammed cell death\tN
GO:0043065\tpositive regulation of apoptotic process\tN
GO:0000001\tmitochondrion inheritance\tY

# custom code column
GO:0099999\tcoded term\tN\t7
";

const RELATIONS: &str = "\
! child\tparent\trelation
GO:0009987\tGO:0008150\tI
GO:0012501\tGO:0009987\tI
GO:0006915\tGO:0012501\tI
GO:0043065\tGO:0006915\t+
GO:0000001\tGO:0009987\treplaced_by
GO:0006915\tGO:1234567\tP
";

const SUBSETS: &str = "\
GO:0008150\tgoslim_generic\tSLIM
GO:0006915\tgoslim_generic\tSLIM
GO:0009987\tgocheck_do_not_annotate\tREGULAR
GO:5555555\tgoslim_generic\tSLIM
";

fn source(relations: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "terms.tsv", TERMS);
    write(dir.path(), "relations.tsv", relations);
    write(dir.path(), "subsets.tsv", SUBSETS);
    dir
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_load_terms_relations_and_subsets() {
    let dir = source(RELATIONS);
    let ontology = OntologyLoader::new(dir.path(), "GO").load().unwrap();

    assert_eq!(ontology.term_count(), 7);
    let obsolete = ontology.term("GO:0000001").unwrap();
    assert!(obsolete.is_obsolete);
    assert_eq!(ontology.term("GO:0099999").unwrap().code, Some(7));

    let regulation = ontology.idx_of("GO:0043065").unwrap();
    let parents = ontology.term_at(regulation).parents();
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].relation, RelationType::PositivelyRegulates);

    let slim = ontology.subset("goslim_generic").unwrap();
    assert_eq!(slim.term_ids(), vec!["GO:0006915", "GO:0008150"]);
    assert!(ontology.subset("gocheck_do_not_annotate").is_none());
}

#[test]
fn test_obsolescence_edges_are_not_parents() {
    let dir = source(RELATIONS);
    let ontology = OntologyLoader::new(dir.path(), "GO").load().unwrap();

    let obsolete = ontology.term("GO:0000001").unwrap();
    assert!(obsolete.parents().is_empty());
    let replacement = ontology.idx_of("GO:0009987").unwrap();
    assert_eq!(obsolete.replaced_by().collect::<Vec<_>>(), vec![replacement]);
}

#[test]
fn test_closure_over_loaded_graph() {
    let dir = source(RELATIONS);
    let ontology = OntologyLoader::new(dir.path(), "GO").load().unwrap();

    let apoptosis = ontology.idx_of("GO:0006915").unwrap();
    let root = ontology.idx_of("GO:0008150").unwrap();
    assert_eq!(ontology.ancestry(apoptosis, "I").unwrap().len(), 4);
    assert!(ontology.has_ancestor(apoptosis, root));

    let regulation = ontology.idx_of("GO:0043065").unwrap();
    let slim = ontology.ancestry(regulation, "I=PO").unwrap();
    assert_eq!(slim.to_vec(), vec![regulation]);
    let regulated = ontology.ancestry(regulation, "R").unwrap();
    assert_eq!(regulated.len(), 5);
}

#[test]
fn test_root_edges_are_skipped() {
    let dir = source(RELATIONS);
    let ontology = OntologyLoader::new(dir.path(), "GO")
        .with_root("GO:0008150")
        .load()
        .unwrap();

    let cellular = ontology.term("GO:0009987").unwrap();
    assert!(cellular.parents().is_empty());
    assert!(ontology.term("GO:0008150").unwrap().child_relations().is_empty());
}

#[test]
fn test_warm_up_computes_every_closure() {
    let dir = source(RELATIONS);
    let ontology = OntologyLoader::new(dir.path(), "GO")
        .with_warm_up(true)
        .load()
        .unwrap();

    assert_eq!(ontology.closure_computations(), 7);
    assert!(ontology.iter().all(|t| t.has_cached_ancestors()));
}

#[test]
fn test_relations_file_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "terms.tsv", TERMS);

    let ontology = OntologyLoader::new(dir.path(), "GO").load().unwrap();
    assert_eq!(ontology.len(), 7);
    assert_eq!(ontology.subset_names().count(), 0);
}

#[test]
fn test_missing_terms_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = OntologyLoader::new(dir.path(), "GO").load();
    assert!(matches!(result, Err(OntologyError::Io { .. })));
}

#[test]
fn test_short_row_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "terms.tsv", "GO:0008150\tbiological_process\tN\nGO:0009987\n");

    match OntologyLoader::new(dir.path(), "GO").load() {
        Err(OntologyError::Malformed { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected malformed row, got {other:?}"),
    }
}

#[test]
fn test_unknown_relation_token_is_malformed() {
    let dir = source("GO:0009987\tGO:0008150\tdevelops_from\n");

    match OntologyLoader::new(dir.path(), "GO").load() {
        Err(OntologyError::Malformed { line, message, .. }) => {
            assert_eq!(line, 1);
            assert!(message.contains("develops_from"));
        }
        other => panic!("expected malformed row, got {other:?}"),
    }
}

#[test]
fn test_cyclic_source_is_rejected() {
    let dir = source(
        "GO:0009987\tGO:0008150\tI\n\
         GO:0008150\tGO:0012501\tP\n\
         GO:0012501\tGO:0009987\tI\n",
    );

    let result = OntologyLoader::new(dir.path(), "GO").load();
    assert!(matches!(result, Err(OntologyError::Cycle { .. })));
}
