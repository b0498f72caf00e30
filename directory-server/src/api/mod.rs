//! API routes
//!
//! - [`root`] - service info and 404 fallback
//! - [`health`] - health checks
//! - [`auth`] - signup and login
//! - [`employees`] - employee CRUD (bearer token required)
//! - [`upload`] - stored profile images

pub mod auth;
pub mod employees;
pub mod health;
pub mod root;
pub mod upload;
