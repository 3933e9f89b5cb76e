use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use crate::build::IndexBuilder;
use crate::error::Result;
use crate::models::BuildReport;
use crate::ontology::OntologyGraph;
use crate::source::{RecordSource, SecondaryCatalog};
use crate::store::new_generation_name;

use super::Termsift;

impl Termsift {
    /// Build a fresh generation, persist it, then make it live.
    ///
    /// Any failure before promotion leaves the live generation untouched.
    pub fn rebuild(
        &self,
        source: &dyn RecordSource,
        ontology: &dyn OntologyGraph,
        catalog: Option<&SecondaryCatalog>,
    ) -> Result<BuildReport> {
        let started = Instant::now();
        let now = Utc::now();
        let name = new_generation_name(now);

        let built = IndexBuilder::new(ontology, &self.config.build)
            .with_catalog(catalog)
            .build(source, &name, &now.to_rfc3339())
            .inspect_err(|err| warn!(generation = %name, error = %err, "rebuild failed"))?;

        let generation = built.generation;
        let sample_group_count = generation.sample_groups().len();
        let term_count = generation.terms().len();

        self.store.write_generation(&generation)?;
        let previous_generation = self.store.promote(&name)?;
        self.handle.publish(generation)?;

        let report = BuildReport {
            generation: name,
            sample_count: built.sample_count,
            sample_group_count,
            term_count,
            previous_generation,
            elapsed_ms: started.elapsed().as_millis(),
        };
        info!(
            generation = %report.generation,
            samples = report.sample_count,
            sample_groups = report.sample_group_count,
            terms = report.term_count,
            elapsed_ms = report.elapsed_ms,
            "rebuild complete"
        );
        Ok(report)
    }
}
