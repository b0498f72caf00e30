//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::ValidationFailed | Self::InvalidRequest => StatusCode::BAD_REQUEST,

            Self::MissingCredential
            | Self::InvalidCredential
            | Self::ExpiredCredential
            | Self::LoginFailed => StatusCode::UNAUTHORIZED,

            Self::NotFound => StatusCode::NOT_FOUND,

            Self::DuplicateEmail => StatusCode::CONFLICT,

            Self::InternalError | Self::StorageUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_are_unauthorized() {
        for code in [
            ErrorCode::MissingCredential,
            ErrorCode::InvalidCredential,
            ErrorCode::ExpiredCredential,
            ErrorCode::LoginFailed,
        ] {
            assert_eq!(code.http_status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_directory_statuses() {
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::DuplicateEmail.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::StorageUnavailable.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
