use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use termsift_core::TermsiftError;

use crate::dto::{SampleErrorResponse, TermErrorResponse};

/// Which resource an error belongs to; the terms resource always carries an
/// empty result list next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Samples,
    Terms,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "handlers naturally own error values from `Result` and pass them through"
)]
pub fn termsift_error_response(err: TermsiftError, resource: Resource, operation: &str) -> Response {
    if err.is_user_facing() {
        debug!(operation, code = err.code(), "rejected query");
        let message = err.to_string();
        return match resource {
            Resource::Samples => (StatusCode::OK, Json(SampleErrorResponse { error: message }))
                .into_response(),
            Resource::Terms => (
                StatusCode::OK,
                Json(TermErrorResponse {
                    error: message,
                    terms: Vec::new(),
                }),
            )
                .into_response(),
        };
    }

    let payload = err.to_payload(operation);
    error!(
        operation,
        code = err.code(),
        trace_id = %payload.trace_id,
        error = %err,
        "request failed"
    );
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
