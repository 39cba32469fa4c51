//! HTTP evaluator error types.

use flagline_client::EvaluationError;
use std::time::Duration;
use thiserror::Error;

/// Result type for HTTP evaluator operations.
pub type Result<T> = std::result::Result<T, HttpEvaluatorError>;

/// HTTP evaluator errors.
#[derive(Debug, Error)]
pub enum HttpEvaluatorError {
    /// Base URL or endpoint path could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Evaluator could not be built from its configuration.
    #[error("Failed to build HTTP evaluator: {0}")]
    Build(String),

    /// Non-success response from the evaluation endpoint.
    #[error("Response error: {status} - {message}")]
    Response {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder when empty.
        message: String,
    },

    /// Body was not a flag result.
    #[error("JSON error: {0}")]
    Json(String),

    /// Underlying HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl HttpEvaluatorError {
    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Check if this is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect())
    }

    /// Get the HTTP status code if this is a response error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Map onto the client's failure taxonomy.
    ///
    /// `timeout` is the request timeout that was in force, reported on timeouts.
    pub fn into_evaluation_error(self, timeout: Duration) -> EvaluationError {
        if self.is_timeout() {
            return EvaluationError::Timeout(timeout);
        }

        match self {
            Self::Response { status, message } if status == 401 || status == 403 => {
                EvaluationError::Unauthorized(message)
            }
            Self::Response { status, message } => EvaluationError::Remote { status, message },
            Self::Json(message) => EvaluationError::Decode(message),
            Self::Http(e) if e.is_decode() => EvaluationError::Decode(e.to_string()),
            Self::Http(e) => match e.status() {
                Some(status) => EvaluationError::Remote {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => EvaluationError::Transport(e.to_string()),
            },
            other => EvaluationError::Other(other.to_string()),
        }
    }
}
