use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::generation::GenerationHandle;
use crate::store::SqliteIndexStore;

mod build_service;
mod generation_service;
mod query_service;

pub const INDEX_DB_FILE: &str = "index.sqlite3";

/// Entry point tying the generation store, the live generation and the
/// query engine together.
#[derive(Clone)]
pub struct Termsift {
    root: PathBuf,
    pub store: SqliteIndexStore,
    handle: GenerationHandle,
    config: AppConfig,
}

impl std::fmt::Debug for Termsift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Termsift")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl Termsift {
    pub fn open(root_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_config(root_dir, AppConfig::from_env()?)
    }

    /// Open the store under `root_dir` and publish its live generation, if any.
    pub fn open_with_config(root_dir: impl Into<PathBuf>, config: AppConfig) -> Result<Self> {
        let root = root_dir.into();
        fs::create_dir_all(&root)?;
        let store = SqliteIndexStore::open(root.join(INDEX_DB_FILE))?;
        let handle = GenerationHandle::default();
        let client = Self {
            root,
            store,
            handle,
            config,
        };
        client.reload()?;
        Ok(client)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared pointer to the generation queries read from.
    #[must_use]
    pub fn handle(&self) -> GenerationHandle {
        self.handle.clone()
    }

    /// Publish whatever generation the store currently marks live.
    pub fn reload(&self) -> Result<()> {
        match self.store.load_live()? {
            Some(generation) => {
                self.handle.publish(generation)?;
            }
            None => info!(root = %self.root.display(), "no live generation yet"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
