use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::grouping::RawSampleGroup;
use crate::models::{DisplayTerm, SampleGroup};
use crate::ontology::{HIERARCHY_RELATIONS, OntologyGraph, OntologyPrecedence};

/// Expands raw term ids into closure terms and display terms.
///
/// Closures and names are memoized because most term ids recur across many
/// sample groups.
pub struct ClosureBuilder<'a> {
    ontology: &'a dyn OntologyGraph,
    precedence: &'a OntologyPrecedence,
    closures: HashMap<String, Arc<BTreeSet<String>>>,
    names: HashMap<String, String>,
}

impl<'a> ClosureBuilder<'a> {
    pub fn new(ontology: &'a dyn OntologyGraph, precedence: &'a OntologyPrecedence) -> Self {
        Self {
            ontology,
            precedence,
            closures: HashMap::new(),
            names: HashMap::new(),
        }
    }

    pub fn build_all(&mut self, groups: Vec<RawSampleGroup>) -> Result<Vec<SampleGroup>> {
        let out = groups
            .into_iter()
            .map(|group| self.build(group))
            .collect::<Result<Vec<_>>>()?;
        info!(
            groups = out.len(),
            distinct_terms = self.closures.len(),
            "expanded sample group terms"
        );
        Ok(out)
    }

    pub fn build(&mut self, group: RawSampleGroup) -> Result<SampleGroup> {
        let closure_terms = self.closure_terms(&group.term_ids)?;
        let specific = self.most_specific(&group.term_ids)?;
        let display_terms = self.display_terms(&specific)?;
        Ok(SampleGroup {
            id: group.id,
            study: group.study,
            attributes: group.attributes,
            samples: group.samples,
            sample_type: group.sample_type,
            display_terms,
            closure_terms,
        })
    }

    /// `term_ids` together with every is-a/part-of ancestor of each of them.
    pub fn closure_terms(&mut self, term_ids: &[String]) -> Result<Vec<String>> {
        let mut out = BTreeSet::new();
        for term_id in term_ids {
            out.extend(self.closure(term_id)?.iter().cloned());
        }
        Ok(out.into_iter().collect())
    }

    /// Terms of `term_ids` with no descendant also present in `term_ids`.
    pub fn most_specific(&mut self, term_ids: &[String]) -> Result<Vec<String>> {
        let present = term_ids.iter().collect::<BTreeSet<_>>();
        let mut redundant = BTreeSet::new();
        for term_id in &present {
            let closure = self.closure(term_id)?;
            for ancestor in closure.iter() {
                if ancestor != *term_id && present.contains(ancestor) {
                    redundant.insert(ancestor.clone());
                }
            }
        }
        Ok(present
            .into_iter()
            .filter(|term_id| !redundant.contains(*term_id))
            .cloned()
            .collect())
    }

    /// Group `term_ids` by name, ordering ids by precedence and entries by
    /// their first id.
    pub fn display_terms(&mut self, term_ids: &[String]) -> Result<Vec<DisplayTerm>> {
        let mut by_name = BTreeMap::<String, Vec<String>>::new();
        for term_id in term_ids {
            let name = self.name(term_id)?;
            by_name.entry(name).or_default().push(term_id.clone());
        }
        let mut out = by_name
            .into_iter()
            .map(|(name, mut ids)| {
                self.precedence.sort_ids(&mut ids);
                DisplayTerm { name, ids }
            })
            .collect::<Vec<_>>();
        out.sort_by(|a, b| a.ids[0].cmp(&b.ids[0]).then_with(|| a.name.cmp(&b.name)));
        Ok(out)
    }

    fn closure(&mut self, term_id: &str) -> Result<Arc<BTreeSet<String>>> {
        if let Some(cached) = self.closures.get(term_id) {
            return Ok(cached.clone());
        }
        let closure = Arc::new(self.ontology.closure(term_id, &HIERARCHY_RELATIONS)?);
        self.closures.insert(term_id.to_string(), closure.clone());
        Ok(closure)
    }

    fn name(&mut self, term_id: &str) -> Result<String> {
        if let Some(cached) = self.names.get(term_id) {
            return Ok(cached.clone());
        }
        let name = self.ontology.resolve_name(term_id)?;
        self.names.insert(term_id.to_string(), name.clone());
        Ok(name)
    }
}

#[cfg(test)]
mod tests;
