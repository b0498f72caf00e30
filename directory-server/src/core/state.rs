use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::db::repository::RepoError;
use crate::services::ImageStore;
use crate::utils::{AppError, ErrorCode};

/// Server state - shared handles for every handler
///
/// Cheap to clone; built once at startup and never mutated.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | configuration (immutable) |
/// | db | Surreal<Db> | embedded store |
/// | jwt_service | Arc<JwtService> | token issue and verification |
/// | images | ImageStore | profile image storage |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub images: ImageStore,
}

impl ServerState {
    /// Build a state from already opened parts
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let images = ImageStore::new(config.uploads_path());
        Self {
            config,
            db,
            jwt_service,
            images,
        }
    }

    /// Initialize server state
    ///
    /// 1. Uploads directory
    /// 2. Database (RocksDB or in-memory) with schema applied
    /// 3. Token service
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        std::fs::create_dir_all(config.uploads_path())?;

        let db_service = if config.uses_memory_database() {
            DbService::memory().await?
        } else {
            DbService::open(&PathBuf::from(&config.database_path)).await?
        };

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Token service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn is_production(&self) -> bool {
        self.config.is_production()
    }

    /// Translate a repository failure into the API error
    ///
    /// Storage causes are attached as `details.error` outside production.
    pub fn repo_error(&self, err: RepoError) -> AppError {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(email) => AppError::duplicate_email(email),
            RepoError::Database(cause) => {
                tracing::error!(error = %cause, "Storage operation failed");
                self.internal_detail(AppError::new(ErrorCode::StorageUnavailable), cause)
            }
        }
    }

    /// Attach an internal cause to an error outside production
    pub fn internal_detail(&self, err: AppError, cause: impl Into<String>) -> AppError {
        if self.is_production() {
            err
        } else {
            err.with_detail("error", cause.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn state(environment: &str) -> ServerState {
        let mut config = Config::for_testing(std::env::temp_dir().to_string_lossy());
        config.environment = environment.to_string();
        let db = DbService::memory().await.unwrap().db;
        ServerState::new(config, db)
    }

    #[tokio::test]
    async fn test_repo_error_mapping() {
        let state = state("development").await;

        let err = state.repo_error(RepoError::NotFound("Employee x not found".into()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Employee x not found");

        let err = state.repo_error(RepoError::Duplicate("a@x.com".into()));
        assert_eq!(err.code, ErrorCode::DuplicateEmail);

        let err = state.repo_error(RepoError::Database("disk on fire".into()));
        assert_eq!(err.code, ErrorCode::StorageUnavailable);
        assert_eq!(err.details.unwrap()["error"], "disk on fire");
    }

    #[tokio::test]
    async fn test_storage_cause_hidden_in_production() {
        let state = state("production").await;
        let err = state.repo_error(RepoError::Database("disk on fire".into()));
        assert_eq!(err.code, ErrorCode::StorageUnavailable);
        assert!(err.details.is_none());
    }
}
