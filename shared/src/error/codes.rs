//! Unified error codes for the employee directory
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Directory (employee/user record) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values on the wire so that the
/// server, the Rust client and the browser client agree on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Malformed request body (bad JSON, broken multipart)
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// No bearer token supplied, or the Authorization header is malformed
    MissingCredential = 1001,
    /// Token signature or payload did not verify
    InvalidCredential = 1002,
    /// Token is past its embedded expiry
    ExpiredCredential = 1003,
    /// Unknown email or wrong password at login
    LoginFailed = 1004,

    // ==================== 4xxx: Directory ====================
    /// Email already used by another record
    DuplicateEmail = 4001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Document store fault
    StorageUnavailable = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            ErrorCode::MissingCredential => "No token, auth denied",
            ErrorCode::InvalidCredential => "Token is not valid",
            ErrorCode::ExpiredCredential => "Token has expired",
            ErrorCode::LoginFailed => "Invalid email or password",

            ErrorCode::DuplicateEmail => "Email is already in use",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageUnavailable => "Storage unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            1001 => Ok(ErrorCode::MissingCredential),
            1002 => Ok(ErrorCode::InvalidCredential),
            1003 => Ok(ErrorCode::ExpiredCredential),
            1004 => Ok(ErrorCode::LoginFailed),

            4001 => Ok(ErrorCode::DuplicateEmail),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
