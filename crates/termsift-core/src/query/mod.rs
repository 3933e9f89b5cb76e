mod params;
mod samples;
mod terms;

pub use params::{parse_sample_query, parse_term_query};
pub use samples::search_samples;
pub use terms::{lookup_terms, lookup_terms_with_fallback};

pub const MISSING_FILTER_MESSAGE: &str =
    "Please enter some query terms in the \"and\" field, or provide a study ID.";
pub const QUERY_TOO_BROAD_MESSAGE: &str = "Your search matches too many samples and the server exceeded its memory limit.  Please try a more-specific search.";
pub const MISSING_TERMS_MESSAGE: &str = "Please enter some query terms";
pub const NON_INTEGER_LIMIT_MESSAGE: &str = "Limit argument must be an integer.";
