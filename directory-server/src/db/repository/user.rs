//! User Repository (credential store)

use super::{BaseRepository, RepoError, RepoResult, is_unique_violation, new_key, record_id};
use crate::db::models::{UserCreate, UserRecord, UserRow};
use crate::db::schema::USER_TABLE;
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by (normalized) email, including the password hash
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let mut result = self
            .base
            .db()
            .query("SELECT *, meta::id(id) AS record_id FROM app_user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let rows: Vec<UserRow> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<UserRow>> {
        let mut result = self
            .base
            .db()
            .query("SELECT *, meta::id(id) AS record_id FROM $thing")
            .bind(("thing", record_id(USER_TABLE, id)))
            .await?;
        let rows: Vec<UserRow> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Create a new user
    pub async fn create(&self, data: UserCreate) -> RepoResult<UserRow> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(data.email));
        }

        let key = new_key();
        let email = data.email.clone();
        let record = UserRecord {
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: now_millis(),
        };

        self.base
            .db()
            .query("CREATE $thing CONTENT $content")
            .bind(("thing", record_id(USER_TABLE, &key)))
            .bind(("content", record))
            .await?
            .check()
            .map_err(|e| {
                if is_unique_violation(&e) {
                    RepoError::Duplicate(email)
                } else {
                    RepoError::from(e)
                }
            })?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}
