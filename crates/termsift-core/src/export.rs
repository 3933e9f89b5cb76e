use crate::error::{Result, TermsiftError};
use crate::models::{SampleGroupView, SampleMember, SampleSearchResult, StudyResult};

pub const SAMPLES_CSV_FILENAME: &str = "termsift-samples.csv";
pub const RUNS_CSV_FILENAME: &str = "termsift-runs.csv";
pub const RUN_IDS_FILENAME: &str = "termsift-runs.ids.txt";

const SAMPLES_CSV_HEADER: [&str; 9] = [
    "study_id",
    "study_title",
    "sample_id",
    "sample_name",
    "sample_type",
    "sample_type_confidence",
    "mapped_ontology_ids",
    "mapped_ontology_terms",
    "raw_SRA_metadata",
];

const RUNS_CSV_HEADER: [&str; 6] = [
    "sra_study_id",
    "study_title",
    "sra_sample_id",
    "sample_name",
    "sra_experiment_id",
    "sra_run_id",
];

/// One CSV row per sample of the returned page.
pub fn samples_csv(result: &SampleSearchResult) -> Result<String> {
    let mut writer = csv_writer();
    writer.write_record(SAMPLES_CSV_HEADER)?;
    for (study, group, sample) in samples(result) {
        let (sample_type, confidence) = group
            .sample_type
            .as_ref()
            .map(|found| (found.label.clone(), found.confidence.to_string()))
            .unwrap_or_default();
        let ids = group
            .display_terms
            .iter()
            .map(|term| term.ids.join(", "))
            .collect::<Vec<_>>()
            .join(", ");
        let names = group
            .display_terms
            .iter()
            .map(|term| term.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let raw = group
            .attributes
            .iter()
            .map(|attribute| format!("{}: {}", attribute.key, attribute.value))
            .collect::<Vec<_>>()
            .join("; ");
        writer.write_record([
            study.study.id.as_str(),
            study.study.title.as_str(),
            sample.id.as_str(),
            sample.name.as_deref().unwrap_or_default(),
            sample_type.as_str(),
            confidence.as_str(),
            ids.as_str(),
            names.as_str(),
            raw.as_str(),
        ])?;
    }
    finish(writer)
}

/// One CSV row per sequencing run of the returned page.
pub fn runs_csv(result: &SampleSearchResult) -> Result<String> {
    let mut writer = csv_writer();
    writer.write_record(RUNS_CSV_HEADER)?;
    for (study, _, sample) in samples(result) {
        for experiment in &sample.experiments {
            for run in &experiment.runs {
                writer.write_record([
                    study.study.id.as_str(),
                    study.study.title.as_str(),
                    sample.id.as_str(),
                    sample.name.as_deref().unwrap_or_default(),
                    experiment.id.as_str(),
                    run.as_str(),
                ])?;
            }
        }
    }
    finish(writer)
}

/// Newline-joined run ids of the returned page.
#[must_use]
pub fn run_ids_text(result: &SampleSearchResult) -> String {
    samples(result)
        .flat_map(|(_, _, sample)| sample.experiments.iter())
        .flat_map(|experiment| experiment.runs.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

fn samples(
    result: &SampleSearchResult,
) -> impl Iterator<Item = (&StudyResult, &SampleGroupView, &SampleMember)> {
    result.studies.iter().flat_map(|study| {
        study.sample_groups.iter().flat_map(move |group| {
            group
                .samples
                .iter()
                .map(move |sample| (study, group, sample))
        })
    })
}

fn csv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| TermsiftError::Io(err.into_error()))?;
    String::from_utf8(bytes).map_err(|err| TermsiftError::Internal(format!("csv export: {err}")))
}
