//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk, or the in-memory engine when the
//! configured path is `memory`.

pub mod models;
pub mod repository;
pub mod schema;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::ServerError;

pub const NAMESPACE: &str = "directory";
pub const DATABASE: &str = "directory";

/// Database service - owns the embedded store handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk store and apply the schema
    pub async fn open(path: &Path) -> Result<Self, ServerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Surreal::new::<RocksDb>(path).await?;
        tracing::info!(path = %path.display(), "Database opened (RocksDB)");
        Self::prepare(db).await
    }

    /// Open an in-memory store and apply the schema
    pub async fn memory() -> Result<Self, ServerError> {
        let db = Surreal::new::<Mem>(()).await?;
        tracing::info!("Database opened (in-memory)");
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, ServerError> {
        db.use_ns(NAMESPACE).use_db(DATABASE).await?;
        schema::apply(&db).await?;
        Ok(Self { db })
    }
}
