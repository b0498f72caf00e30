//! Core - configuration, state, server and startup errors
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - shared handles injected into handlers
//! - [`Server`] - HTTP listener and router assembly
//! - [`ServerError`] - startup errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::{Server, build_router, serve};
pub use state::ServerState;
