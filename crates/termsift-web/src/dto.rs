use serde::Serialize;

use termsift_core::models::TermView;

/// Body returned for caller mistakes on the sample resources.
#[derive(Debug, Serialize)]
pub struct SampleErrorResponse {
    pub error: String,
}

/// Body returned for caller mistakes on the terms resource.
#[derive(Debug, Serialize)]
pub struct TermErrorResponse {
    pub error: String,
    pub terms: Vec<TermView>,
}
