use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, TermsiftError>;

#[derive(Debug, Error)]
pub enum TermsiftError {
    #[error("{0}")]
    InvalidQuery(String),

    #[error("{0}")]
    QueryTooBroad(String),

    #[error("unknown ontology term: {0}")]
    UnknownTerm(String),

    #[error("obo parse error at line {line}: {message}")]
    OboParse { line: usize, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
}

impl TermsiftError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::QueryTooBroad(_) => "QUERY_TOO_BROAD",
            Self::UnknownTerm(_) => "UNKNOWN_TERM",
            Self::OboParse { .. } => "OBO_PARSE_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Sqlite(_) => "SQLITE_ERROR",
            Self::Csv(_) => "CSV_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Errors caused by the caller's request rather than by the service.
    ///
    /// These are answered with a structured `{ "error": ... }` body instead of
    /// being treated as faults.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidQuery(_) | Self::QueryTooBroad(_))
    }

    pub fn to_payload(&self, operation: impl Into<String>) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    pub(crate) fn lock_poisoned(name: &str) -> Self {
        Self::Internal(format!("{name} lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_errors_render_bare_message() {
        let err = TermsiftError::InvalidQuery("Please enter some query terms".to_string());
        assert!(err.is_user_facing());
        assert_eq!(err.to_string(), "Please enter some query terms");
    }

    #[test]
    fn build_errors_are_not_user_facing() {
        let err = TermsiftError::UnknownTerm("CL:9999999".to_string());
        assert!(!err.is_user_facing());
        let payload = err.to_payload("build");
        assert_eq!(payload.code, "UNKNOWN_TERM");
        assert_eq!(payload.operation, "build");
        assert!(Uuid::parse_str(&payload.trace_id).is_ok());
    }
}
