use serde::{Deserialize, Serialize};

use super::{DisplayTerm, SampleGroupView, Study, TermView};

/// Raw sample-search parameters as they arrive from a query string.
///
/// Every field stays textual so malformed pagination never fails extraction;
/// [`crate::query::parse_sample_query`] coerces them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleQueryParams {
    pub and: Option<String>,
    pub not: Option<String>,
    pub study: Option<String>,
    pub sampletype: Option<String>,
    pub skip: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleQuery {
    pub and_terms: Vec<String>,
    pub not_terms: Vec<String>,
    pub study_id: Option<String>,
    pub sample_type: Option<String>,
    pub skip: usize,
    /// `None` means unbounded.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSearchResult {
    pub study_count: usize,
    pub sample_count: usize,
    pub skip: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub studies: Vec<StudyResult>,
    pub terms: Vec<TermFacet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyResult {
    pub study: Study,
    pub sample_groups: Vec<SampleGroupView>,
    pub sample_count: usize,
    pub dterms: Vec<DisplayTerm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermFacet {
    pub dterm: DisplayTerm,
    pub sample_count: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermQueryParams {
    pub q: Option<String>,
    pub id: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    pub text: Option<String>,
    pub ids: Vec<String>,
    pub limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermLookupResult {
    pub terms: Vec<TermView>,
}
