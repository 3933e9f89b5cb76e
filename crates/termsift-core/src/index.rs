use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;

use crate::models::{SampleGroup, TermEntry};

pub const EMPTY_GENERATION_NAME: &str = "empty";

/// One immutable, fully built index generation.
///
/// Holds the sample groups and the term dictionary together with the
/// postings the query engine reads: closure term and study id to groups,
/// search token and ontology id to dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct IndexGeneration {
    name: String,
    created_at: String,
    sample_groups: Vec<SampleGroup>,
    terms: Vec<TermEntry>,
    groups_by_term: HashMap<String, Vec<usize>>,
    groups_by_study: HashMap<String, Vec<usize>>,
    entries_by_token: BTreeMap<String, Vec<usize>>,
    entries_by_id: HashMap<String, Vec<usize>>,
}

impl IndexGeneration {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        created_at: impl Into<String>,
        mut sample_groups: Vec<SampleGroup>,
        terms: Vec<TermEntry>,
    ) -> Self {
        // Query matching binary-searches closure terms.
        for group in &mut sample_groups {
            group.closure_terms.sort();
            group.closure_terms.dedup();
        }

        let mut groups_by_term = HashMap::<String, Vec<usize>>::new();
        let mut groups_by_study = HashMap::<String, Vec<usize>>::new();
        for (idx, group) in sample_groups.iter().enumerate() {
            for term_id in &group.closure_terms {
                groups_by_term.entry(term_id.clone()).or_default().push(idx);
            }
            groups_by_study
                .entry(group.study.id.clone())
                .or_default()
                .push(idx);
        }
        for postings in groups_by_term.values_mut() {
            postings.dedup();
        }

        let mut entries_by_token = BTreeMap::<String, Vec<usize>>::new();
        let mut entries_by_id = HashMap::<String, Vec<usize>>::new();
        for (idx, entry) in terms.iter().enumerate() {
            for token in &entry.tokens {
                entries_by_token.entry(token.clone()).or_default().push(idx);
            }
            for id in &entry.ids {
                entries_by_id.entry(id.clone()).or_default().push(idx);
            }
        }

        Self {
            name: name.into(),
            created_at: created_at.into(),
            sample_groups,
            terms,
            groups_by_term,
            groups_by_study,
            entries_by_token,
            entries_by_id,
        }
    }

    /// Placeholder served before any generation has been published.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            name: EMPTY_GENERATION_NAME.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    #[must_use]
    pub fn sample_groups(&self) -> &[SampleGroup] {
        &self.sample_groups
    }

    #[must_use]
    pub fn terms(&self) -> &[TermEntry] {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sample_groups.is_empty() && self.terms.is_empty()
    }

    pub(crate) fn group(&self, idx: usize) -> &SampleGroup {
        &self.sample_groups[idx]
    }

    pub(crate) fn term(&self, idx: usize) -> &TermEntry {
        &self.terms[idx]
    }

    pub(crate) fn groups_with_term(&self, term_id: &str) -> &[usize] {
        self.groups_by_term
            .get(term_id)
            .map_or(&[], Vec::as_slice)
    }

    pub(crate) fn groups_in_study(&self, study_id: &str) -> &[usize] {
        self.groups_by_study
            .get(study_id)
            .map_or(&[], Vec::as_slice)
    }

    pub(crate) fn entries_with_id(&self, id: &str) -> &[usize] {
        self.entries_by_id.get(id).map_or(&[], Vec::as_slice)
    }

    /// Entries owning at least one token that starts with `prefix`.
    pub(crate) fn entries_with_token_prefix(&self, prefix: &str) -> BTreeSet<usize> {
        self.entries_by_token
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(token, _)| token.starts_with(prefix))
            .flat_map(|(_, postings)| postings.iter().copied())
            .collect()
    }

    pub(crate) fn all_entries(&self) -> BTreeSet<usize> {
        (0..self.terms.len()).collect()
    }
}
