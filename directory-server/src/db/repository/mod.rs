//! Repository Module
//!
//! CRUD operations over the SurrealDB tables.

pub mod employee;
pub mod user;

pub use employee::EmployeeRepository;
pub use user::UserRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention
// =============================================================================
//
// The API exposes the bare record key (32 hex chars). Repositories build
// the full id with `RecordId::from_table_key(table, key)` and read keys back
// through `meta::id(id) AS record_id`.

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Full record id for a bare key
pub(crate) fn record_id(table: &str, key: &str) -> RecordId {
    RecordId::from_table_key(table, key.to_string())
}

/// Fresh record key (simple UUID v4, 32 hex chars)
pub(crate) fn new_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Unique index violations that slipped past the pre-write check
pub(crate) fn is_unique_violation(err: &surrealdb::Error) -> bool {
    err.to_string().contains("already contains")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_key_format() {
        let key = new_key();
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, new_key());
    }
}
