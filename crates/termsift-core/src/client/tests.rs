use tempfile::tempdir;

use crate::config::{AppConfig, BuildConfig};
use crate::error::TermsiftError;
use crate::models::{
    Attribute, DisplayTerm, Experiment, SampleQueryParams, SampleRecord, Study, TermQueryParams,
};
use crate::ontology::OboOntology;
use crate::source::SecondaryCatalog;

use super::{INDEX_DB_FILE, Termsift};

const OBO: &str = r#"
[Term]
id: CL:0000000
name: cell

[Term]
id: CL:0000542
name: lymphocyte
synonym: "lymphocytic cell" EXACT []
is_a: CL:0000000

[Term]
id: CL:0000540
name: neuron
is_a: CL:0000000
"#;

fn config() -> AppConfig {
    AppConfig {
        build: BuildConfig {
            dictionary_workers: 2,
            ..BuildConfig::default()
        },
        ..AppConfig::default()
    }
}

fn record(id: &str, study: &str, terms: &[&str], replicate: &str) -> SampleRecord {
    SampleRecord {
        id: id.to_string(),
        study: Study::new(study, format!("{study} study")),
        attributes: vec![
            Attribute::new("cell type", "lymphocyte"),
            Attribute::new("replicate", replicate),
            Attribute::new("source_name", format!("{id} source")),
        ],
        name: None,
        term_ids: terms.iter().map(ToString::to_string).collect(),
        sample_type: None,
        experiments: vec![Experiment {
            id: format!("{id}-X"),
            runs: vec![format!("{id}-R")],
        }],
    }
}

fn lymphocyte_records() -> Vec<SampleRecord> {
    vec![
        record("SRS1", "SRP1", &["CL:0000542"], "1"),
        record("SRS2", "SRP1", &["CL:0000542"], "2"),
    ]
}

fn and_params(terms: &str) -> SampleQueryParams {
    SampleQueryParams {
        and: Some(terms.to_string()),
        ..SampleQueryParams::default()
    }
}

#[test]
fn rebuild_groups_replicates_and_answers_searches() {
    let temp = tempdir().expect("tempdir");
    let app = Termsift::open_with_config(temp.path(), config()).expect("open");
    let ontology = OboOntology::parse(OBO).expect("ontology");

    let report = app
        .rebuild(&lymphocyte_records(), &ontology, None)
        .expect("rebuild");
    assert_eq!(report.sample_count, 2);
    assert_eq!(report.sample_group_count, 1);
    assert_eq!(report.previous_generation, None);
    assert!(temp.path().join(INDEX_DB_FILE).exists());

    let generation = app.handle().current().expect("current");
    let group = &generation.sample_groups()[0];
    assert_eq!(group.samples.len(), 2);
    assert!(group.closure_terms.contains(&"CL:0000542".to_string()));
    assert!(group.closure_terms.contains(&"CL:0000000".to_string()));
    assert_eq!(
        group.display_terms,
        vec![DisplayTerm {
            name: "lymphocyte".to_string(),
            ids: vec!["CL:0000542".to_string()],
        }]
    );

    let result = app.search_samples(&and_params("cl:0000000")).expect("search");
    assert_eq!(result.study_count, 1);
    assert_eq!(result.sample_count, 2);

    let terms = app
        .lookup_terms(&TermQueryParams {
            q: Some("lymphocytic".to_string()),
            ..TermQueryParams::default()
        })
        .expect("terms");
    assert_eq!(terms.terms.len(), 1);
    assert_eq!(terms.terms[0].name, "lymphocyte");
    assert_eq!(terms.terms[0].ancestors[0].name, "cell");
}

#[test]
fn failed_rebuild_keeps_the_live_generation() {
    let temp = tempdir().expect("tempdir");
    let app = Termsift::open_with_config(temp.path(), config()).expect("open");
    let ontology = OboOntology::parse(OBO).expect("ontology");
    let first = app
        .rebuild(&lymphocyte_records(), &ontology, None)
        .expect("rebuild");

    let broken = vec![record("SRS9", "SRP9", &["CL:9999999"], "1")];
    let err = app.rebuild(&broken, &ontology, None).expect_err("unknown term");
    assert!(matches!(err, TermsiftError::UnknownTerm(_)));

    assert_eq!(app.handle().current().expect("current").name(), first.generation);
    assert_eq!(
        app.store.live_generation_name().expect("live").as_deref(),
        Some(first.generation.as_str())
    );
    assert_eq!(app.generations().expect("list").len(), 1);
}

#[test]
fn reopening_the_root_serves_the_stored_generation() {
    let temp = tempdir().expect("tempdir");
    let ontology = OboOntology::parse(OBO).expect("ontology");
    let built = {
        let app = Termsift::open_with_config(temp.path(), config()).expect("open");
        app.rebuild(&lymphocyte_records(), &ontology, None)
            .expect("rebuild")
    };

    let reopened = Termsift::open_with_config(temp.path(), config()).expect("reopen");
    assert_eq!(
        reopened.handle().current().expect("current").name(),
        built.generation
    );
    let result = reopened
        .search_samples(&and_params("CL:0000542"))
        .expect("search");
    assert_eq!(result.sample_count, 2);
}

#[test]
fn rollback_republishes_previous_generation() {
    let temp = tempdir().expect("tempdir");
    let app = Termsift::open_with_config(temp.path(), config()).expect("open");
    let ontology = OboOntology::parse(OBO).expect("ontology");

    let first = app
        .rebuild(&lymphocyte_records(), &ontology, None)
        .expect("first rebuild");
    let mut more = lymphocyte_records();
    more.push(record("SRS3", "SRP2", &["CL:0000540"], "1"));
    let second = app.rebuild(&more, &ontology, None).expect("second rebuild");
    assert_eq!(second.previous_generation.as_deref(), Some(first.generation.as_str()));
    assert_eq!(
        app.search_samples(&and_params("CL:0000000"))
            .expect("search")
            .study_count,
        2
    );

    assert_eq!(app.rollback().expect("rollback"), first.generation);
    assert_eq!(
        app.search_samples(&and_params("CL:0000000"))
            .expect("search")
            .study_count,
        1
    );
}

#[test]
fn catalog_ids_are_merged_into_studies() {
    let temp = tempdir().expect("tempdir");
    let app = Termsift::open_with_config(temp.path(), config()).expect("open");
    let ontology = OboOntology::parse(OBO).expect("ontology");
    let catalog = SecondaryCatalog::from_csv_reader("project\nSRP1\n".as_bytes()).expect("catalog");

    app.rebuild(&lymphocyte_records(), &ontology, Some(&catalog))
        .expect("rebuild");
    let result = app.search_samples(&and_params("CL:0000542")).expect("search");
    assert_eq!(result.studies[0].study.recount_id.as_deref(), Some("SRP1"));
}

#[test]
fn queries_before_any_build_report_user_errors_or_nothing() {
    let temp = tempdir().expect("tempdir");
    let app = Termsift::open_with_config(temp.path(), config()).expect("open");

    let err = app
        .search_samples(&SampleQueryParams::default())
        .expect_err("missing filter");
    assert!(err.is_user_facing());

    let result = app.search_samples(&and_params("CL:0000000")).expect("search");
    assert_eq!(result.study_count, 0);
    assert!(app.generations().expect("list").is_empty());
    assert!(matches!(app.rollback(), Err(TermsiftError::Conflict(_))));
}
