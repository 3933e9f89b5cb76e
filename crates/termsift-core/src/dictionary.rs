use std::collections::{BTreeMap, BTreeSet, HashMap};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::error::{Result, TermsiftError};
use crate::models::{DisplayTerm, SampleGroup, TermEntry};
use crate::ontology::OntologyGraph;
use crate::tokens::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborDirection {
    Ancestors,
    Descendants,
}

/// Builds one [`TermEntry`] per distinct term name found in the closure
/// terms of a finished sample-group index.
pub struct DictionaryBuilder<'a> {
    ontology: &'a dyn OntologyGraph,
    config: &'a BuildConfig,
    /// Every id present in at least one group's closure, with its name.
    vocabulary: HashMap<String, String>,
}

impl<'a> DictionaryBuilder<'a> {
    pub fn new(
        groups: &[SampleGroup],
        ontology: &'a dyn OntologyGraph,
        config: &'a BuildConfig,
    ) -> Result<Self> {
        let ids = groups
            .iter()
            .flat_map(|group| group.closure_terms.iter())
            .collect::<BTreeSet<_>>();
        let mut vocabulary = HashMap::with_capacity(ids.len());
        for id in ids {
            vocabulary.insert(id.clone(), ontology.resolve_name(id)?);
        }
        Ok(Self {
            ontology,
            config,
            vocabulary,
        })
    }

    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Candidate entries: ids grouped by their resolved name.
    #[must_use]
    pub fn candidates(&self) -> BTreeMap<String, Vec<String>> {
        let mut by_name = BTreeMap::<String, Vec<String>>::new();
        for (id, name) in &self.vocabulary {
            by_name.entry(name.clone()).or_default().push(id.clone());
        }
        by_name
    }

    /// Build every entry, fanning per-entry work out over a bounded pool.
    pub fn build(&self) -> Result<Vec<TermEntry>> {
        let candidates = self.candidates().into_iter().collect::<Vec<_>>();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.dictionary_workers.max(1))
            .thread_name(|idx| format!("termsift-dictionary-{idx}"))
            .build()
            .map_err(|err| TermsiftError::Internal(format!("dictionary worker pool: {err}")))?;

        let entries = pool.install(|| {
            candidates
                .par_iter()
                .map(|(name, ids)| self.build_entry(name, ids))
                .collect::<Result<Vec<_>>>()
        })?;
        info!(
            vocabulary = self.vocabulary.len(),
            entries = entries.len(),
            workers = self.config.dictionary_workers,
            "built term dictionary"
        );
        Ok(entries)
    }

    pub fn build_entry(&self, name: &str, ids: &[String]) -> Result<TermEntry> {
        let mut name_and_synonyms = BTreeSet::from([name.to_string()]);
        for id in ids {
            name_and_synonyms.extend(self.ontology.synonyms(id)?);
        }

        let mut tokens = BTreeSet::new();
        for text in &name_and_synonyms {
            tokens.extend(tokenize(text));
        }
        let name_tokens = tokenize(name);

        let ancestors = self.neighbor_facet(ids, NeighborDirection::Ancestors)?;
        let descendants = self.neighbor_facet(ids, NeighborDirection::Descendants)?;

        let synonyms = name_and_synonyms
            .iter()
            .filter(|text| text.as_str() != name)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let mut ids = ids.to_vec();
        self.config.precedence.sort_ids(&mut ids);

        Ok(TermEntry {
            name: name.to_string(),
            ids,
            synonyms,
            tokens,
            name_tokens,
            ancestors,
            descendants,
            score: name.chars().count(),
        })
    }

    /// Indexed neighbors of `ids` grouped by name.
    ///
    /// Computed at the configured radius first; a facet with more distinct
    /// names than the shrinkage threshold is recomputed at radius 1.
    pub fn neighbor_facet(
        &self,
        ids: &[String],
        direction: NeighborDirection,
    ) -> Result<Vec<DisplayTerm>> {
        let radius = self.config.neighbor_radius.max(1);
        let facet = self.neighbors_at(ids, direction, radius)?;
        if facet.len() <= self.config.neighbor_shrinkage_threshold || radius == 1 {
            return Ok(facet);
        }
        debug!(
            ids = ?ids,
            ?direction,
            names = facet.len(),
            "neighbor facet over threshold, shrinking to radius 1"
        );
        self.neighbors_at(ids, direction, 1)
    }

    fn neighbors_at(
        &self,
        ids: &[String],
        direction: NeighborDirection,
        radius: usize,
    ) -> Result<Vec<DisplayTerm>> {
        let mut related = BTreeSet::new();
        for id in ids {
            let found = match direction {
                NeighborDirection::Ancestors => self.ontology.ancestors_within_radius(id, radius)?,
                NeighborDirection::Descendants => {
                    self.ontology.descendants_within_radius(id, radius)?
                }
            };
            related.extend(found);
        }

        let mut by_name = BTreeMap::<&str, Vec<String>>::new();
        for id in related {
            if ids.contains(&id) {
                continue;
            }
            let Some(name) = self.vocabulary.get(&id) else {
                continue;
            };
            by_name.entry(name.as_str()).or_default().push(id);
        }
        Ok(by_name
            .into_iter()
            .map(|(name, mut ids)| {
                self.config.precedence.sort_ids(&mut ids);
                DisplayTerm {
                    name: name.to_string(),
                    ids,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests;
