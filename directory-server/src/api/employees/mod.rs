//! Employee API Module
//!
//! Every route here requires a valid bearer token.

pub mod form;
mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_auth;
use crate::core::ServerState;

/// Employee router
pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/employees", routes(state))
}

fn routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/search/by", get(handler::search))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
