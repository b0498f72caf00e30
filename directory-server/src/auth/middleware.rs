//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, rejection};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Require a valid bearer token
///
/// Reads `Authorization: Bearer <token>`, verifies it and inserts
/// [`CurrentUser`] into the request extensions. The same value is copied
/// onto the response so the request logger can report the caller.
///
/// | Failure | Code | HTTP |
/// |---------|------|------|
/// | header absent or malformed | MissingCredential | 401 |
/// | bad signature or payload | InvalidCredential | 401 |
/// | past expiry | ExpiredCredential | 401 |
///
/// Applied with `route_layer` on protected routers only, so unmatched
/// paths still fall through to the 404 handler.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match state.get_jwt_service().verify_bearer(auth_header) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user.clone());
            let mut response = next.run(req).await;
            response.extensions_mut().insert(user);
            Ok(response)
        }
        Err(e) => {
            security_log!(
                WARN,
                "auth_rejected",
                reason = %e,
                method = %req.method(),
                uri = %req.uri().path()
            );
            Err(rejection(&e))
        }
    }
}
