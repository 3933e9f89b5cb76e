use tracing::{info, info_span};

use crate::closure::ClosureBuilder;
use crate::config::BuildConfig;
use crate::dictionary::DictionaryBuilder;
use crate::error::Result;
use crate::grouping::group_samples;
use crate::index::IndexGeneration;
use crate::ontology::OntologyGraph;
use crate::source::{RecordSource, SecondaryCatalog};

/// A generation built in memory, before it is stored or published.
#[derive(Debug)]
pub struct BuiltGeneration {
    pub generation: IndexGeneration,
    pub sample_count: usize,
}

/// Runs the rebuild stages in order: grouping, term closure, catalog merge,
/// then the term dictionary. Each stage consumes the complete output of the
/// previous one.
pub struct IndexBuilder<'a> {
    ontology: &'a dyn OntologyGraph,
    config: &'a BuildConfig,
    catalog: Option<&'a SecondaryCatalog>,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(ontology: &'a dyn OntologyGraph, config: &'a BuildConfig) -> Self {
        Self {
            ontology,
            config,
            catalog: None,
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: Option<&'a SecondaryCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn build(
        &self,
        source: &dyn RecordSource,
        name: &str,
        created_at: &str,
    ) -> Result<BuiltGeneration> {
        let span = info_span!("build_generation", generation = name);
        let _entered = span.enter();

        let records = source.records()?;
        let sample_count = records.len();
        let raw_groups = group_samples(records);

        let mut closure = ClosureBuilder::new(self.ontology, &self.config.precedence);
        let mut groups = closure.build_all(raw_groups)?;

        if let Some(catalog) = self.catalog {
            let tagged = catalog.apply(&mut groups);
            info!(tagged, catalog = catalog.len(), "merged secondary catalog ids");
        }

        let terms = DictionaryBuilder::new(&groups, self.ontology, self.config)?.build()?;

        Ok(BuiltGeneration {
            generation: IndexGeneration::new(name, created_at, groups, terms),
            sample_count,
        })
    }
}
