//! CurrentUser extractor
//!
//! Lets a handler take [`CurrentUser`] as an argument. Reuses the value
//! placed by [`require_auth`](super::require_auth) when present, otherwise
//! verifies the header itself.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, rejection};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match state.get_jwt_service().verify_bearer(auth_header) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                security_log!(WARN, "auth_rejected", reason = %e, uri = %parts.uri.path());
                Err(rejection(&e))
            }
        }
    }
}
