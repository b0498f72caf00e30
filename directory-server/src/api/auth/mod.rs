//! Authentication Routes
//!
//! Both routes are public.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Build authentication router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/signup", post(handler::signup))
        .route("/api/login", post(handler::login))
}
