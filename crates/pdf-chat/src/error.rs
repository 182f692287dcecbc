//! Error types for the PDF chat service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::retry::{classify, FailureKind};

/// Message returned to callers once retries against a rate-limited provider run out
pub const RATE_LIMIT_MESSAGE: &str = "API rate limit exceeded. Please try again in a few minutes.";

/// Result type alias for PDF chat operations
pub type Result<T> = std::result::Result<T, Error>;

/// PDF chat errors
#[derive(Debug, Error)]
pub enum Error {
    /// Bad request from the caller (wrong file type, missing field)
    #[error("{0}")]
    InvalidInput(String),

    /// Chat requested before any document was ingested
    #[error("Please upload a PDF file first")]
    NotReady,

    /// Upstream quota exhausted after all retry attempts
    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// PDF parsing error
    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Gemini chat error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error, message is passed through to the caller
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Reduce a failure to the two outcomes callers see for upstream work:
    /// `RateLimited` when the message carries the quota signal, otherwise
    /// `Internal` with the original text. Caller-facing kinds pass through.
    pub fn classified(self) -> Self {
        let message = match self {
            Error::InvalidInput(_) | Error::NotReady | Error::RateLimited => return self,
            Error::Internal(msg) => msg,
            other => other.to_string(),
        };

        match classify(&message) {
            FailureKind::RateLimited => Error::RateLimited,
            FailureKind::Internal => Error::Internal(message),
        }
    }

    /// HTTP status and machine-readable kind for this error
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            Error::NotReady => (StatusCode::BAD_REQUEST, "not_ready"),
            Error::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            Error::Parse(_) => (StatusCode::INTERNAL_SERVER_ERROR, "parse_error"),
            Error::Embedding(_) => (StatusCode::INTERNAL_SERVER_ERROR, "embedding_error"),
            Error::Llm(_) => (StatusCode::INTERNAL_SERVER_ERROR, "llm_error"),
            Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            Error::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, "json_error"),
            Error::Http(_) => (StatusCode::INTERNAL_SERVER_ERROR, "http_error"),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_kind();
        let message = self.to_string();

        let body = Json(json!({
            "detail": message,
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::invalid_input("Only PDF files are allowed").status_and_kind().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::NotReady.status_and_kind().0, StatusCode::BAD_REQUEST);
        assert_eq!(Error::RateLimited.status_and_kind().0, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            Error::internal("boom").status_and_kind().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_classified_provider_errors() {
        let limited = Error::embedding("HTTP 429 Too Many Requests").classified();
        assert!(matches!(limited, Error::RateLimited));

        let quota = Error::llm("Resource has been exhausted (e.g. check QUOTA).").classified();
        assert!(matches!(quota, Error::RateLimited));

        match Error::parse("bad xref table").classified() {
            Error::Internal(msg) => assert_eq!(msg, "Failed to parse PDF: bad xref table"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode_failure_maps_to_json_error() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(
            err.status_and_kind(),
            (StatusCode::INTERNAL_SERVER_ERROR, "json_error")
        );
        assert!(matches!(err.classified(), Error::Internal(msg) if msg.starts_with("JSON error:")));
    }

    #[test]
    fn test_classified_keeps_caller_errors() {
        assert!(matches!(Error::NotReady.classified(), Error::NotReady));
        assert!(matches!(
            Error::invalid_input("quota").classified(),
            Error::InvalidInput(_)
        ));
        assert!(matches!(Error::internal("429").classified(), Error::RateLimited));
    }

    #[test]
    fn test_rate_limited_hides_details() {
        assert_eq!(Error::RateLimited.to_string(), RATE_LIMIT_MESSAGE);
    }
}
