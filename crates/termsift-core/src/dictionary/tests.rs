use std::collections::BTreeSet;

use crate::config::BuildConfig;
use crate::models::{DisplayTerm, SampleGroup, Study};
use crate::ontology::{OboOntology, OntologyPrecedence};

use super::{DictionaryBuilder, NeighborDirection};

const OBO: &str = r#"
[Term]
id: UBERON:0000061
name: anatomical structure

[Term]
id: UBERON:0000179
name: haemolymphatic fluid
is_a: UBERON:0000061

[Term]
id: UBERON:0000178
name: blood
synonym: "whole blood" EXACT []
synonym: "blood" RELATED []
is_a: UBERON:0000179

[Term]
id: EFO:0000296
name: blood
synonym: "Blood-derived" RELATED []

[Term]
id: UBERON:0013756
name: venous blood
is_a: UBERON:0000178

[Term]
id: UBERON:0013755
name: arterial blood
is_a: UBERON:0000178

[Term]
id: UBERON:0012168
name: umbilical cord blood
is_a: UBERON:0000178
"#;

fn ontology() -> OboOntology {
    OboOntology::parse(OBO).expect("ontology")
}

fn group(closure: &[&str]) -> SampleGroup {
    SampleGroup {
        id: closure.join("+"),
        study: Study::new("SRP1", "study"),
        attributes: Vec::new(),
        samples: Vec::new(),
        sample_type: None,
        display_terms: Vec::new(),
        closure_terms: closure.iter().map(ToString::to_string).collect(),
    }
}

fn indexed_groups() -> Vec<SampleGroup> {
    vec![
        group(&[
            "UBERON:0000061",
            "UBERON:0000179",
            "UBERON:0000178",
            "UBERON:0013756",
        ]),
        group(&[
            "UBERON:0000061",
            "UBERON:0000179",
            "UBERON:0000178",
            "UBERON:0013755",
        ]),
        group(&["EFO:0000296"]),
    ]
}

fn config() -> BuildConfig {
    BuildConfig {
        dictionary_workers: 2,
        ..BuildConfig::default()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn ids_sharing_a_name_collapse_into_one_entry() {
    let ontology = ontology();
    let config = config();
    let groups = indexed_groups();
    let builder = DictionaryBuilder::new(&groups, &ontology, &config).expect("builder");
    let entries = builder.build().expect("build");

    let names = entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "anatomical structure",
            "arterial blood",
            "blood",
            "haemolymphatic fluid",
            "venous blood"
        ]
    );
    let blood = entries.iter().find(|e| e.name == "blood").expect("blood");
    assert_eq!(blood.ids, strings(&["UBERON:0000178", "EFO:0000296"]));
    assert_eq!(blood.score, 5);
}

#[test]
fn synonyms_and_tokens_cover_every_id_of_the_entry() {
    let ontology = ontology();
    let config = config();
    let groups = indexed_groups();
    let builder = DictionaryBuilder::new(&groups, &ontology, &config).expect("builder");
    let blood = builder
        .build_entry("blood", &strings(&["EFO:0000296", "UBERON:0000178"]))
        .expect("entry");

    assert_eq!(blood.synonyms, "Blood-derived, whole blood");
    let tokens = blood.tokens.iter().map(String::as_str).collect::<BTreeSet<_>>();
    for expected in ["blood", "blood-derived", "derived", "whole"] {
        assert!(tokens.contains(expected), "missing token {expected}");
    }
    assert_eq!(
        blood.name_tokens.into_iter().collect::<Vec<_>>(),
        strings(&["blood"])
    );
}

#[test]
fn neighbor_facets_only_list_indexed_terms() {
    let ontology = ontology();
    let config = config();
    let groups = indexed_groups();
    let builder = DictionaryBuilder::new(&groups, &ontology, &config).expect("builder");
    let blood = builder
        .build_entry("blood", &strings(&["UBERON:0000178", "EFO:0000296"]))
        .expect("entry");

    assert_eq!(
        blood.ancestors,
        vec![
            DisplayTerm {
                name: "anatomical structure".to_string(),
                ids: strings(&["UBERON:0000061"]),
            },
            DisplayTerm {
                name: "haemolymphatic fluid".to_string(),
                ids: strings(&["UBERON:0000179"]),
            },
        ]
    );
    let descendant_names = blood
        .descendants
        .iter()
        .map(|term| term.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(descendant_names, vec!["arterial blood", "venous blood"]);
}

#[test]
fn wide_facets_shrink_to_radius_one() {
    let ontology = ontology();
    let config = BuildConfig {
        neighbor_shrinkage_threshold: 1,
        ..config()
    };
    let groups = indexed_groups();
    let builder = DictionaryBuilder::new(&groups, &ontology, &config).expect("builder");
    let facet = builder
        .neighbor_facet(&strings(&["UBERON:0000178"]), NeighborDirection::Ancestors)
        .expect("facet");
    assert_eq!(
        facet,
        vec![DisplayTerm {
            name: "haemolymphatic fluid".to_string(),
            ids: strings(&["UBERON:0000179"]),
        }]
    );
}

#[test]
fn terms_without_neighbors_get_empty_facets() {
    let ontology = ontology();
    let config = config();
    let groups = vec![group(&["EFO:0000296"])];
    let builder = DictionaryBuilder::new(&groups, &ontology, &config).expect("builder");
    let entries = builder.build().expect("build");
    assert_eq!(entries.len(), 1);
    assert!(entries[0].ancestors.is_empty());
    assert!(entries[0].descendants.is_empty());
}

#[test]
fn precedence_override_reorders_entry_ids() {
    let ontology = ontology();
    let config = BuildConfig {
        precedence: OntologyPrecedence::parse("EFO,UBERON").expect("precedence"),
        ..config()
    };
    let groups = indexed_groups();
    let builder = DictionaryBuilder::new(&groups, &ontology, &config).expect("builder");
    let blood = builder
        .build_entry("blood", &strings(&["UBERON:0000178", "EFO:0000296"]))
        .expect("entry");
    assert_eq!(blood.ids, strings(&["EFO:0000296", "UBERON:0000178"]));
}
