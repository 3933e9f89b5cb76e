use termsift_core::TermsiftError;

use crate::cli::{SampleFormat, SamplesArgs, TermsArgs};

use super::support::{error_body, sample_params, term_params};

#[test]
fn sample_params_keep_raw_text_for_core_coercion() {
    let params = sample_params(SamplesArgs {
        and: Some("cl:0000000".to_string()),
        not: None,
        study: Some("srp1".to_string()),
        sampletype: Some("primary+cells".to_string()),
        skip: Some("abc".to_string()),
        limit: Some("-1".to_string()),
        format: SampleFormat::Csv,
    });
    assert_eq!(params.and.as_deref(), Some("cl:0000000"));
    assert_eq!(params.study.as_deref(), Some("srp1"));
    assert_eq!(params.skip.as_deref(), Some("abc"));
    assert_eq!(params.limit.as_deref(), Some("-1"));
}

#[test]
fn term_params_copy_all_fields() {
    let params = term_params(TermsArgs {
        q: Some("t cell".to_string()),
        id: Some("CL:0000084".to_string()),
        limit: Some("5".to_string()),
    });
    assert_eq!(params.q.as_deref(), Some("t cell"));
    assert_eq!(params.id.as_deref(), Some("CL:0000084"));
    assert_eq!(params.limit.as_deref(), Some("5"));
}

#[test]
fn user_error_bodies_match_the_api() {
    let err = TermsiftError::InvalidQuery("Please enter some query terms".to_string());
    assert_eq!(
        error_body(&err, true),
        serde_json::json!({ "error": "Please enter some query terms", "terms": [] })
    );
    assert_eq!(
        error_body(&err, false),
        serde_json::json!({ "error": "Please enter some query terms" })
    );
}
