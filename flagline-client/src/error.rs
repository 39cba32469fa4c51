//! Error types for flag evaluation and client configuration.

use std::time::Duration;
use thiserror::Error;

/// Result type for evaluator calls.
pub type Result<T> = std::result::Result<T, EvaluationError>;

/// Failure of a single remote flag check.
///
/// `FlagClient` does not distinguish between these variants when deciding
/// what to return; they exist so diagnostics and callers using
/// [`FlagCheck::into_result`](crate::FlagCheck::into_result) can tell them apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// The request never reached the evaluation service.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transport gave up waiting for an answer.
    #[error("Flag check timed out after {0:?}")]
    Timeout(Duration),

    /// The caller is not allowed to evaluate the flag.
    #[error("Not authorized to evaluate flag: {0}")]
    Unauthorized(String),

    /// The evaluation service answered with an error.
    #[error("Evaluation service error: {status} - {message}")]
    Remote {
        /// Status reported by the service.
        status: u16,
        /// Error message from the service.
        message: String,
    },

    /// The answer could not be read as a flag result.
    #[error("Invalid flag result: {0}")]
    Decode(String),

    /// Any other evaluator failure.
    #[error("{0}")]
    Other(String),
}

impl EvaluationError {
    /// Create an error from an arbitrary message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Get the remote status code, if the service produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for EvaluationError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Errors raised while loading client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EvaluationError::Remote {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Evaluation service error: 500 - boom");
        assert_eq!(err.status_code(), Some(500));

        let err = EvaluationError::Timeout(Duration::from_secs(2));
        assert!(err.to_string().contains("2s"));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_json_error_is_decode() {
        let json_err = serde_json::from_str::<bool>("maybe").unwrap_err();
        let err: EvaluationError = json_err.into();
        assert!(matches!(err, EvaluationError::Decode(_)));
    }
}
