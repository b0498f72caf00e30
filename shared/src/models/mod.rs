//! Data models
//!
//! Shared between directory-server and clients (via API).
//! Record ids are opaque strings; timestamps are Unix milliseconds.

pub mod employee;
pub mod user;

// Re-exports
pub use employee::*;
pub use user::*;
