use crate::error::{Result, TermsiftError};
use crate::models::GenerationInfo;

use super::Termsift;

impl Termsift {
    pub fn generations(&self) -> Result<Vec<GenerationInfo>> {
        self.store.list_generations()
    }

    /// Make the previous generation live again and publish it.
    pub fn rollback(&self) -> Result<String> {
        let live = self.store.rollback()?;
        let generation = self
            .store
            .load_live()?
            .ok_or_else(|| TermsiftError::NotFound(format!("generation {live}")))?;
        self.handle.publish(generation)?;
        Ok(live)
    }
}
