//! Shared types for the employee directory
//!
//! Error codes, the unified response envelope and the DTOs exchanged
//! between `directory-server` and its clients.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
