use std::sync::{Arc, RwLock};

use tracing::info;

use crate::error::{Result, TermsiftError};
use crate::index::IndexGeneration;

/// Versioned pointer to the generation queries run against.
///
/// Readers take a cheap `Arc` snapshot and keep using it for the whole
/// request; publishing swaps the pointer and never mutates a generation.
#[derive(Debug, Clone)]
pub struct GenerationHandle {
    current: Arc<RwLock<Arc<IndexGeneration>>>,
}

impl Default for GenerationHandle {
    fn default() -> Self {
        Self::new(IndexGeneration::empty())
    }
}

impl GenerationHandle {
    #[must_use]
    pub fn new(generation: IndexGeneration) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(generation))),
        }
    }

    pub fn current(&self) -> Result<Arc<IndexGeneration>> {
        let guard = self
            .current
            .read()
            .map_err(|_| TermsiftError::lock_poisoned("generation"))?;
        Ok(Arc::clone(&guard))
    }

    /// Make `generation` visible to new readers and return the one it replaced.
    pub fn publish(&self, generation: IndexGeneration) -> Result<Arc<IndexGeneration>> {
        let next = Arc::new(generation);
        let mut guard = self
            .current
            .write()
            .map_err(|_| TermsiftError::lock_poisoned("generation"))?;
        let replaced = std::mem::replace(&mut *guard, Arc::clone(&next));
        drop(guard);
        info!(
            generation = next.name(),
            replaced = replaced.name(),
            sample_groups = next.sample_groups().len(),
            terms = next.terms().len(),
            "published index generation"
        );
        Ok(replaced)
    }
}
