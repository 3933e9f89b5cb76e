use tracing::debug;

use crate::error::Result;
use crate::models::{SampleQueryParams, SampleSearchResult, TermLookupResult, TermQueryParams};
use crate::query::{
    lookup_terms_with_fallback, parse_sample_query, parse_term_query, search_samples,
};

use super::Termsift;

impl Termsift {
    pub fn search_samples(&self, params: &SampleQueryParams) -> Result<SampleSearchResult> {
        let query = parse_sample_query(params);
        let generation = self.handle.current()?;
        let result = search_samples(&generation, &query, &self.config.query)?;
        debug!(
            generation = generation.name(),
            studies = result.study_count,
            samples = result.sample_count,
            "sample search"
        );
        Ok(result)
    }

    pub fn lookup_terms(&self, params: &TermQueryParams) -> Result<TermLookupResult> {
        let query = parse_term_query(params, self.config.query.term_limit_cap)?;
        let generation = self.handle.current()?;
        let result = lookup_terms_with_fallback(&generation, &query);
        debug!(
            generation = generation.name(),
            terms = result.terms.len(),
            "term lookup"
        );
        Ok(result)
    }
}
