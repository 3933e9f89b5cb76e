use super::env::read_env_usize;

const ENV_MAX_MATCHED_GROUPS: &str = "TERMSIFT_MAX_MATCHED_GROUPS";
const ENV_TERM_LIMIT_CAP: &str = "TERMSIFT_TERM_LIMIT_CAP";

pub(crate) const DEFAULT_MAX_MATCHED_GROUPS: usize = 250_000;
pub(crate) const DEFAULT_TERM_LIMIT_CAP: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// Working-memory budget of one sample search, in matched sample groups.
    pub max_matched_groups: usize,
    /// Default and upper bound of the autocomplete result size.
    pub term_limit_cap: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_matched_groups: DEFAULT_MAX_MATCHED_GROUPS,
            term_limit_cap: DEFAULT_TERM_LIMIT_CAP,
        }
    }
}

impl QueryConfig {
    #[must_use]
    pub(super) fn from_env() -> Self {
        Self {
            max_matched_groups: read_env_usize(
                ENV_MAX_MATCHED_GROUPS,
                DEFAULT_MAX_MATCHED_GROUPS,
                1,
            ),
            term_limit_cap: read_env_usize(ENV_TERM_LIMIT_CAP, DEFAULT_TERM_LIMIT_CAP, 1),
        }
    }
}
