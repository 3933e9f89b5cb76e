use crate::error::Result;
use crate::ontology::OntologyPrecedence;

use super::env::{read_env_usize, read_non_empty_env};

const ENV_NEIGHBOR_RADIUS: &str = "TERMSIFT_NEIGHBOR_RADIUS";
const ENV_NEIGHBOR_SHRINKAGE_THRESHOLD: &str = "TERMSIFT_NEIGHBOR_SHRINKAGE_THRESHOLD";
const ENV_DICTIONARY_WORKERS: &str = "TERMSIFT_DICTIONARY_WORKERS";
const ENV_ONTOLOGY_PRECEDENCE: &str = "TERMSIFT_ONTOLOGY_PRECEDENCE";

pub(crate) const DEFAULT_NEIGHBOR_RADIUS: usize = 2;
pub(crate) const DEFAULT_NEIGHBOR_SHRINKAGE_THRESHOLD: usize = 50;

#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Radius of the first neighbor-facet lookup; the fallback always uses 1.
    pub neighbor_radius: usize,
    /// Distinct-name count above which a facet is recomputed at radius 1.
    pub neighbor_shrinkage_threshold: usize,
    pub dictionary_workers: usize,
    pub precedence: OntologyPrecedence,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            neighbor_shrinkage_threshold: DEFAULT_NEIGHBOR_SHRINKAGE_THRESHOLD,
            dictionary_workers: default_workers(),
            precedence: OntologyPrecedence::default(),
        }
    }
}

impl BuildConfig {
    pub(super) fn from_env() -> Result<Self> {
        let precedence = match read_non_empty_env(ENV_ONTOLOGY_PRECEDENCE) {
            Some(raw) => OntologyPrecedence::parse(&raw)?,
            None => OntologyPrecedence::default(),
        };
        Ok(Self {
            neighbor_radius: read_env_usize(ENV_NEIGHBOR_RADIUS, DEFAULT_NEIGHBOR_RADIUS, 1),
            neighbor_shrinkage_threshold: read_env_usize(
                ENV_NEIGHBOR_SHRINKAGE_THRESHOLD,
                DEFAULT_NEIGHBOR_SHRINKAGE_THRESHOLD,
                1,
            ),
            dictionary_workers: read_env_usize(ENV_DICTIONARY_WORKERS, default_workers(), 1),
            precedence,
        })
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get)
}
