use crate::error::Result;

mod build;
mod env;
mod query;

pub use build::BuildConfig;
pub use query::QueryConfig;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub build: BuildConfig,
    pub query: QueryConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            build: BuildConfig::from_env()?,
            query: QueryConfig::from_env(),
        })
    }
}
