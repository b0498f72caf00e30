//! Authentication module
//!
//! - [`JwtService`] - token issue and verification
//! - [`CurrentUser`] - authenticated caller context
//! - [`require_auth`] - bearer token middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;

use crate::utils::AppError;

/// Map a verification failure onto the unauthorized error family
pub fn rejection(err: &JwtError) -> AppError {
    match err {
        JwtError::MissingToken => AppError::missing_credential(),
        JwtError::ExpiredToken => AppError::expired_credential(),
        _ => AppError::invalid_credential(),
    }
}
