//! Directory Client - HTTP client for the employee directory server
//!
//! Wraps the REST API: signup and login, then token-authenticated
//! employee calls.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{DirectoryClient, ProfileImage};

// Re-export shared types for convenience
pub use shared::models::{
    DeletedEmployee, Employee, EmployeeFields, EmployeeQuery, LoginResponse, UserInfo,
};
pub use shared::{ApiResponse, ErrorCode};
