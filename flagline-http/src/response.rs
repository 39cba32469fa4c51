//! Evaluation endpoint response.

use bytes::Bytes;
use http::StatusCode;

use crate::{HttpEvaluatorError, Result};

/// Response from one of the check endpoints.
#[derive(Debug)]
pub struct FlagResponse {
    status: StatusCode,
    body: Bytes,
}

impl FlagResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Create a response from a reqwest response.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let body = response.bytes().await?;
        Ok(Self { status, body })
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the response body as bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Check for an error response and return it.
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            return Ok(self);
        }

        let text = String::from_utf8_lossy(&self.body).trim().to_string();
        let message = if text.is_empty() {
            self.status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            text
        };

        Err(HttpEvaluatorError::Response {
            status: self.status.as_u16(),
            message,
        })
    }

    /// Read the body as a flag result.
    ///
    /// `true`/`false` are explicit answers; `null` or an empty body mean the
    /// service had no answer.
    pub fn flag_result(&self) -> Result<Option<bool>> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<bool>>(&self.body)
            .map_err(|e| HttpEvaluatorError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_result() {
        let ok = |body: &'static str| FlagResponse::new(StatusCode::OK, body).flag_result();

        assert_eq!(ok("true").unwrap(), Some(true));
        assert_eq!(ok(" false\n").unwrap(), Some(false));
        assert_eq!(ok("null").unwrap(), None);
        assert_eq!(ok("").unwrap(), None);
        assert!(ok("\"yes\"").is_err());
        assert!(ok("{\"enabled\":true}").is_err());
    }

    #[test]
    fn test_error_for_status() {
        let response = FlagResponse::new(StatusCode::FORBIDDEN, "");
        match response.error_for_status() {
            Err(HttpEvaluatorError::Response { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("unexpected: {:?}", other),
        }

        let response = FlagResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Apex CPU time limit");
        assert_eq!(response.error_for_status().unwrap_err().status_code(), Some(500));

        assert!(FlagResponse::new(StatusCode::OK, "true").error_for_status().is_ok());
    }
}
