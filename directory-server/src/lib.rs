//! Employee directory server
//!
//! REST API over an embedded SurrealDB store with a bearer-token gate.
//!
//! ```text
//! directory-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── auth/          # JWT service, middleware, extractor, password hashing
//! ├── api/           # routes and handlers
//! ├── db/            # store setup, models, repositories
//! ├── services/      # profile image storage
//! ├── middleware/    # request logging
//! └── utils/         # errors, logging, validation, time
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerError, ServerState, build_router};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging from `LOG_LEVEL`, `LOG_JSON` and `LOG_DIR`
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());

    init_logger_with_file(&level, json, log_dir.as_deref().map(std::path::Path::new))
}
