use crate::error::TermsiftError;
use crate::grouping::RawSampleGroup;
use crate::models::{DisplayTerm, Study};
use crate::ontology::{OboOntology, OntologyPrecedence};

use super::ClosureBuilder;

const OBO: &str = r#"
[Term]
id: CL:0000000
name: cell

[Term]
id: CL:0000542
name: lymphocyte
is_a: CL:0000000

[Term]
id: CL:0000084
name: T cell
is_a: CL:0000542

[Term]
id: UBERON:0000178
name: blood

[Term]
id: UBERON:0013756
name: venous blood
is_a: UBERON:0000178

[Term]
id: EFO:0000001
name: blood
"#;

fn ontology() -> OboOntology {
    OboOntology::parse(OBO).expect("ontology")
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn raw_group(terms: &[&str]) -> RawSampleGroup {
    RawSampleGroup {
        id: "g".to_string(),
        study: Study::new("SRP1", "study"),
        attributes: Vec::new(),
        term_ids: ids(terms),
        sample_type: None,
        samples: Vec::new(),
    }
}

#[test]
fn closure_contains_every_ancestor_and_nothing_else() {
    let ontology = ontology();
    let precedence = OntologyPrecedence::default();
    let mut builder = ClosureBuilder::new(&ontology, &precedence);
    let group = builder
        .build(raw_group(&["CL:0000084", "UBERON:0013756"]))
        .expect("build");
    assert_eq!(
        group.closure_terms,
        ids(&[
            "CL:0000000",
            "CL:0000084",
            "CL:0000542",
            "UBERON:0000178",
            "UBERON:0013756"
        ])
    );
    assert!(!group.closure_terms.contains(&"EFO:0000001".to_string()));
}

#[test]
fn display_terms_keep_only_most_specific_ids() {
    let ontology = ontology();
    let precedence = OntologyPrecedence::default();
    let mut builder = ClosureBuilder::new(&ontology, &precedence);
    let specific = builder
        .most_specific(&ids(&["CL:0000000", "CL:0000542", "CL:0000084", "UBERON:0000178"]))
        .expect("most specific");
    assert_eq!(specific, ids(&["CL:0000084", "UBERON:0000178"]));
}

#[test]
fn display_terms_merge_ids_sharing_a_name() {
    let ontology = ontology();
    let precedence = OntologyPrecedence::default();
    let mut builder = ClosureBuilder::new(&ontology, &precedence);
    let group = builder
        .build(raw_group(&["EFO:0000001", "UBERON:0000178", "CL:0000542"]))
        .expect("build");
    assert_eq!(
        group.display_terms,
        vec![
            DisplayTerm {
                name: "lymphocyte".to_string(),
                ids: ids(&["CL:0000542"]),
            },
            DisplayTerm {
                name: "blood".to_string(),
                ids: ids(&["UBERON:0000178", "EFO:0000001"]),
            },
        ]
    );
}

#[test]
fn unknown_term_aborts_the_build() {
    let ontology = ontology();
    let precedence = OntologyPrecedence::default();
    let mut builder = ClosureBuilder::new(&ontology, &precedence);
    let err = builder
        .build_all(vec![raw_group(&["CL:0000542"]), raw_group(&["CL:7777777"])])
        .expect_err("unknown id must fail");
    assert!(matches!(err, TermsiftError::UnknownTerm(id) if id == "CL:7777777"));
}

#[test]
fn empty_term_set_yields_empty_terms() {
    let ontology = ontology();
    let precedence = OntologyPrecedence::default();
    let mut builder = ClosureBuilder::new(&ontology, &precedence);
    let group = builder.build(raw_group(&[])).expect("build");
    assert!(group.closure_terms.is_empty());
    assert!(group.display_terms.is_empty());
}
