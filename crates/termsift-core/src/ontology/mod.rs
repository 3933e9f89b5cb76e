//! Ontology graph capability used by the closure and dictionary builders.
//!
//! Builders only depend on [`OntologyGraph`]; [`OboOntology`] is the bundled
//! implementation backed by OBO flat files held in memory.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::Result;

mod model;
mod parse;
mod precedence;

pub use model::OboOntology;
pub use precedence::{DEFAULT_ONTOLOGY_PRECEDENCE, OntologyPrecedence};

/// Relations walked upward for closure and most-specific reduction.
pub const HIERARCHY_RELATIONS: [Relation; 2] = [Relation::IsA, Relation::PartOf];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    IsA,
    PartOf,
    Named(String),
}

impl Relation {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "is_a" => Self::IsA,
            "part_of" => Self::PartOf,
            other => Self::Named(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::IsA => "is_a",
            Self::PartOf => "part_of",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only query contract of an ontology collaborator.
///
/// Implementations must be safe to call from many threads at once. Unknown
/// ids are reported as [`crate::TermsiftError::UnknownTerm`].
pub trait OntologyGraph: Send + Sync {
    fn resolve_name(&self, id: &str) -> Result<String>;

    /// Synonyms of `id`, not including its name.
    fn synonyms(&self, id: &str) -> Result<Vec<String>>;

    /// Terms reachable upward from `id` in at most `radius` hierarchy steps,
    /// excluding `id` itself.
    fn ancestors_within_radius(&self, id: &str, radius: usize) -> Result<BTreeSet<String>>;

    /// Terms reachable downward from `id` in at most `radius` hierarchy steps,
    /// excluding `id` itself.
    fn descendants_within_radius(&self, id: &str, radius: usize) -> Result<BTreeSet<String>>;

    /// Reflexive-transitive upward closure of `id` under `relations`.
    fn closure(&self, id: &str, relations: &[Relation]) -> Result<BTreeSet<String>>;
}
