//! Client error types

use std::collections::HashMap;

use serde_json::Value;
use shared::ErrorCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured error returned by the server
    #[error("API error {code} ({status}): {message}")]
    Api {
        status: u16,
        code: u16,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// Error status without a structured body
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Call needs a token but none is held
    #[error("Not logged in")]
    NotLoggedIn,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Known error code of an API error
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => ErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }

    /// HTTP status of a server-side failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_lookup() {
        let err = ClientError::Api {
            status: 401,
            code: 1003,
            message: "Token has expired".to_string(),
            details: None,
        };
        assert_eq!(err.error_code(), Some(ErrorCode::ExpiredCredential));
        assert_eq!(err.status(), Some(401));

        let unknown = ClientError::Api {
            status: 500,
            code: 7777,
            message: "?".to_string(),
            details: None,
        };
        assert_eq!(unknown.error_code(), None);
        assert_eq!(ClientError::NotLoggedIn.status(), None);
    }
}
