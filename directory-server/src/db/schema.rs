//! Table and index definitions (idempotent)

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Table names
pub const EMPLOYEE_TABLE: &str = "employee";
pub const USER_TABLE: &str = "app_user";

const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS employee_email ON TABLE employee FIELDS email UNIQUE;
    DEFINE INDEX IF NOT EXISTS employee_created_at ON TABLE employee FIELDS created_at;

    DEFINE TABLE IF NOT EXISTS app_user SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS app_user_email ON TABLE app_user FIELDS email UNIQUE;
"#;

/// Apply table and index definitions
pub async fn apply(db: &Surreal<Db>) -> Result<(), surrealdb::Error> {
    db.query(SCHEMA).await?.check()?;
    tracing::debug!("Database schema applied");
    Ok(())
}
