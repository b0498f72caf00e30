//! Authentication Handlers
//!
//! Signup and login. Tokens are stateless, so there is no logout route.

use std::time::Duration;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use http::StatusCode;
use shared::models::{LoginRequest, LoginResponse, SignupRequest, UserInfo};

use crate::auth::password::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::UserCreate;
use crate::db::repository::{RepoError, UserRepository};
use crate::security_log;
use crate::utils::error::from_json_rejection;
use crate::utils::validation::{
    MAX_USERNAME_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult};

/// Register a new user
pub async fn signup(
    State(state): State<ServerState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserInfo>>)> {
    let Json(req) = payload.map_err(from_json_rejection)?;

    let username = validate_required_text(&req.username, "username", MAX_USERNAME_LEN)?;
    let email = validate_email(&req.email, "email")?;
    validate_password(&req.password)?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let repo = UserRepository::new(state.get_db());
    let user = match repo
        .create(UserCreate {
            username,
            email,
            password_hash,
        })
        .await
    {
        Ok(user) => user,
        Err(RepoError::Duplicate(email)) => {
            security_log!(INFO, "signup_duplicate_email", email = %email);
            return Err(AppError::duplicate_email(email));
        }
        Err(e) => return Err(state.repo_error(e)),
    };

    tracing::info!(user_id = %user.record_id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "User created successfully",
            UserInfo::from(user),
        )),
    ))
}

/// Exchange email and password for a token
///
/// Unknown email and wrong password produce the same response after the
/// same fixed delay.
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(req) = payload.map_err(from_json_rejection)?;
    let email = req.email.trim().to_lowercase();

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email(&email)
        .await
        .map_err(|e| state.repo_error(e))?;

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(state.config.auth_fixed_delay_ms)).await;

    let user = match user {
        Some(user) => {
            let password_valid = verify_password(&req.password, &user.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
            if !password_valid {
                security_log!(WARN, "login_failed", reason = "invalid_password", user_id = %user.record_id);
                return Err(AppError::login_failed());
            }
            user
        }
        None => {
            security_log!(WARN, "login_failed", reason = "unknown_email");
            return Err(AppError::login_failed());
        }
    };

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(&user.record_id)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    security_log!(INFO, "login_succeeded", user_id = %user.record_id);

    Ok(Json(LoginResponse {
        token,
        expires_in: jwt_service.expires_in_seconds(),
        user: UserInfo::from(user),
    }))
}
