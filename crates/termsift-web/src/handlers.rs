use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use termsift_core::Result;
use termsift_core::export::{self, RUN_IDS_FILENAME, RUNS_CSV_FILENAME, SAMPLES_CSV_FILENAME};
use termsift_core::models::{SampleQueryParams, SampleSearchResult, TermQueryParams};

use crate::WebState;
use crate::error::{Resource, termsift_error_response};

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

pub async fn samples_json(
    State(state): State<WebState>,
    Query(params): Query<SampleQueryParams>,
) -> Response {
    match state.app.search_samples(&params) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => termsift_error_response(err, Resource::Samples, "samples.search"),
    }
}

pub async fn samples_csv(
    State(state): State<WebState>,
    Query(params): Query<SampleQueryParams>,
) -> Response {
    render_page(&state, &params, "samples.csv", |result| {
        Ok(attachment(CSV_CONTENT_TYPE, SAMPLES_CSV_FILENAME, export::samples_csv(result)?))
    })
}

pub async fn runs_csv(
    State(state): State<WebState>,
    Query(params): Query<SampleQueryParams>,
) -> Response {
    render_page(&state, &params, "runs.csv", |result| {
        Ok(attachment(CSV_CONTENT_TYPE, RUNS_CSV_FILENAME, export::runs_csv(result)?))
    })
}

pub async fn run_ids(
    State(state): State<WebState>,
    Query(params): Query<SampleQueryParams>,
) -> Response {
    render_page(&state, &params, "runs.ids", |result| {
        Ok(attachment(TEXT_CONTENT_TYPE, RUN_IDS_FILENAME, export::run_ids_text(result)))
    })
}

pub async fn terms(
    State(state): State<WebState>,
    Query(params): Query<TermQueryParams>,
) -> Response {
    match state.app.lookup_terms(&params) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => termsift_error_response(err, Resource::Terms, "terms.lookup"),
    }
}

/// Run the sample search and render the page with `render`; any failure is
/// answered with the JSON error body of the sample resource.
fn render_page(
    state: &WebState,
    params: &SampleQueryParams,
    operation: &str,
    render: impl FnOnce(&SampleSearchResult) -> Result<Response>,
) -> Response {
    let rendered = state
        .app
        .search_samples(params)
        .and_then(|result| render(&result));
    match rendered {
        Ok(response) => response,
        Err(err) => termsift_error_response(err, Resource::Samples, operation),
    }
}

fn attachment(content_type: &'static str, filename: &str, body: String) -> Response {
    let disposition = format!("attachment; filename={filename}");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
