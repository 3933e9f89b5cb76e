use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::attributes::filter_attributes;
use crate::models::{Attribute, Experiment, SampleMember, SampleRecord, SampleType, Study};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleTypeKey {
    pub label: String,
    confidence_bits: u64,
}

impl From<&SampleType> for SampleTypeKey {
    fn from(sample_type: &SampleType) -> Self {
        Self {
            label: sample_type.label.clone(),
            confidence_bits: sample_type.confidence.to_bits(),
        }
    }
}

/// Deduplication key of a sample group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub study_id: String,
    pub attributes: Vec<Attribute>,
    pub term_ids: Vec<String>,
    pub sample_type: Option<SampleTypeKey>,
}

impl GroupKey {
    /// Stable content-derived identifier of the group.
    #[must_use]
    pub fn group_id(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hash_field(&mut hasher, self.study_id.as_bytes());
        for attribute in &self.attributes {
            hash_field(&mut hasher, attribute.key.as_bytes());
            hash_field(&mut hasher, attribute.value.as_bytes());
        }
        hasher.update(b"|terms|");
        for term_id in &self.term_ids {
            hash_field(&mut hasher, term_id.as_bytes());
        }
        if let Some(sample_type) = &self.sample_type {
            hash_field(&mut hasher, sample_type.label.as_bytes());
            hasher.update(&sample_type.confidence_bits.to_le_bytes());
        }
        let hex = hasher.finalize().to_hex();
        hex.as_str()[..32].to_string()
    }
}

fn hash_field(hasher: &mut blake3::Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// A sample group before its raw term ids are expanded into closure and
/// display terms.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSampleGroup {
    pub id: String,
    pub study: Study,
    pub attributes: Vec<Attribute>,
    pub term_ids: Vec<String>,
    pub sample_type: Option<SampleType>,
    pub samples: Vec<SampleMember>,
}

#[derive(Debug)]
struct GroupAccumulator {
    study: Study,
    sample_type: Option<SampleType>,
    samples: BTreeSet<SampleMember>,
}

/// Partition `records` into sample groups.
///
/// Output order and member order depend only on the set of input records,
/// never on their sequence.
pub fn group_samples<I>(records: I) -> Vec<RawSampleGroup>
where
    I: IntoIterator<Item = SampleRecord>,
{
    let mut groups = BTreeMap::<GroupKey, GroupAccumulator>::new();
    let mut sample_count = 0usize;

    for record in records {
        sample_count += 1;
        let filtered = filter_attributes(&record.attributes);
        let mut term_ids = record.term_ids;
        term_ids.sort();
        term_ids.dedup();
        let key = GroupKey {
            study_id: record.study.id.clone(),
            attributes: filtered.attributes,
            term_ids,
            sample_type: record.sample_type.as_ref().map(SampleTypeKey::from),
        };
        let member = SampleMember {
            id: record.id,
            name: filtered.display_name.or(record.name),
            experiments: canonical_experiments(record.experiments),
        };

        let accumulator = groups.entry(key).or_insert_with(|| GroupAccumulator {
            study: record.study.clone(),
            sample_type: record.sample_type.clone(),
            samples: BTreeSet::new(),
        });
        if record.study.title < accumulator.study.title {
            accumulator.study.title = record.study.title;
        }
        accumulator.samples.insert(member);
    }

    let out = groups
        .into_iter()
        .map(|(key, accumulator)| RawSampleGroup {
            id: key.group_id(),
            study: accumulator.study,
            attributes: key.attributes,
            term_ids: key.term_ids,
            sample_type: accumulator.sample_type,
            samples: accumulator.samples.into_iter().collect(),
        })
        .collect::<Vec<_>>();
    info!(samples = sample_count, groups = out.len(), "grouped samples");
    out
}

fn canonical_experiments(mut experiments: Vec<Experiment>) -> Vec<Experiment> {
    for experiment in &mut experiments {
        experiment.runs.sort();
        experiment.runs.dedup();
    }
    experiments.sort();
    experiments.dedup();
    experiments
}
