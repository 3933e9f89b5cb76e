use std::cmp::Ordering;

use crate::error::{Result, TermsiftError};

pub const DEFAULT_ONTOLOGY_PRECEDENCE: [&str; 5] = ["CVCL", "DOID", "CL", "UBERON", "EFO"];

/// Orders ontology ids by the position of their prefix in a fixed list.
///
/// Ids whose prefix is not listed sort after every listed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyPrecedence {
    prefixes: Vec<String>,
}

impl Default for OntologyPrecedence {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_ONTOLOGY_PRECEDENCE
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl OntologyPrecedence {
    pub fn parse(raw: &str) -> Result<Self> {
        let prefixes = raw
            .split(',')
            .map(|prefix| prefix.trim().to_ascii_uppercase())
            .filter(|prefix| !prefix.is_empty())
            .collect::<Vec<_>>();
        if prefixes.is_empty() {
            return Err(TermsiftError::Validation(format!(
                "ontology precedence list is empty: {raw:?}"
            )));
        }
        Ok(Self { prefixes })
    }

    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    #[must_use]
    pub fn rank(&self, id: &str) -> usize {
        let prefix = id.split(':').next().unwrap_or(id);
        self.prefixes
            .iter()
            .position(|known| known == prefix)
            .unwrap_or(self.prefixes.len())
    }

    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.rank(a).cmp(&self.rank(b)).then_with(|| a.cmp(b))
    }

    pub fn sort_ids(&self, ids: &mut [String]) {
        ids.sort_by(|a, b| self.compare(a, b));
    }
}
