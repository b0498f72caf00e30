//! User Model

use serde::{Deserialize, Serialize};
use shared::models::UserInfo;

/// Stored user document
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub username: String,
    /// Trimmed and lowercased
    pub email: String,
    /// argon2 PHC string
    pub password_hash: String,
    pub created_at: i64,
}

/// User row as selected back from the store
#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    pub record_id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

impl From<UserRow> for UserInfo {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.record_id,
            username: row.username,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

/// Validated signup payload (password already hashed)
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
