//! Unified error handling
//!
//! Every handler returns [`AppResult`]; the error half renders as
//! `ApiResponse { code, message, details }` with the status taken from
//! the error code.
//!
//! ```ignore
//! Err(AppError::not_found("Employee"))
//! Err(AppError::validation("email is required").with_detail("field", "email"))
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;

/// Rejected JSON body
///
/// Well-formed JSON with missing, unknown or mistyped fields is a
/// validation failure; anything else is a malformed request.
pub fn from_json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(e) => AppError::validation(e.body_text()),
        other => AppError::invalid_request(other.body_text()),
    }
}

/// Malformed multipart body
pub fn from_multipart_error(err: MultipartError) -> AppError {
    AppError::invalid_request(format!("Invalid multipart request: {}", err.body_text()))
}
