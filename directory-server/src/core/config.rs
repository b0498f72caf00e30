use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::ServerError;

/// Literal `DATABASE_PATH` value selecting the in-memory engine
pub const MEMORY_DATABASE: &str = "memory";

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | development / staging / production |
/// | HTTP_HOST | 0.0.0.0 | Bind address |
/// | HTTP_PORT | 5001 | Bind port |
/// | WORK_DIR | ./data | Root for database and uploads |
/// | DATABASE_PATH | WORK_DIR/database/directory.db | RocksDB dir, or `memory` |
/// | UPLOADS_DIR | WORK_DIR/uploads | Profile image directory |
/// | JWT_SECRET | dev: random | HMAC key, at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 60 | Token lifetime |
/// | JWT_ISSUER | employee-directory | Token issuer |
/// | JWT_AUDIENCE | employee-directory-clients | Token audience |
/// | AUTH_FIXED_DELAY_MS | 500 | Delay applied to every login attempt |
///
/// Unparseable values fall back to their defaults. Logging variables
/// (`LOG_LEVEL`, `LOG_JSON`, `LOG_DIR`) are read earlier by
/// [`setup_environment`](crate::setup_environment).
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=memory cargo run -p directory-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub http_host: String,
    pub http_port: u16,
    /// Root for database and uploads
    pub work_dir: String,
    /// RocksDB directory, or [`MEMORY_DATABASE`]
    pub database_path: String,
    pub uploads_dir: String,
    /// JWT settings
    pub jwt: JwtConfig,
    /// Fixed login delay (timing attack mitigation)
    pub auth_fixed_delay_ms: u64,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Fails when `JWT_SECRET` is missing or too short outside development.
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = env_or("ENVIRONMENT", "development");
        let work_dir = env_or("WORK_DIR", "./data");

        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("database")
                .join("directory.db")
                .to_string_lossy()
                .into_owned()
        });
        let uploads_dir = std::env::var("UPLOADS_DIR").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("uploads")
                .to_string_lossy()
                .into_owned()
        });

        let jwt = JwtConfig::from_env(environment == "development")
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            http_host: env_or("HTTP_HOST", "0.0.0.0"),
            http_port: env_parse("HTTP_PORT", 5001),
            database_path,
            uploads_dir,
            jwt,
            auth_fixed_delay_ms: env_parse("AUTH_FIXED_DELAY_MS", 500),
            environment,
            work_dir,
        })
    }

    /// Self-contained configuration for tests
    ///
    /// In-memory database, fixed secret, no login delay.
    pub fn for_testing(uploads_dir: impl Into<String>) -> Self {
        Self {
            environment: "development".to_string(),
            http_host: "127.0.0.1".to_string(),
            http_port: 0,
            work_dir: ".".to_string(),
            database_path: MEMORY_DATABASE.to_string(),
            uploads_dir: uploads_dir.into(),
            jwt: JwtConfig {
                secret: "directory-test-secret-0123456789abcdef".to_string(),
                expiration_minutes: 60,
                issuer: "employee-directory".to_string(),
                audience: "employee-directory-clients".to_string(),
            },
            auth_fixed_delay_ms: 0,
        }
    }

    /// Bind address (`host:port`)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn uses_memory_database(&self) -> bool {
        self.database_path == MEMORY_DATABASE
    }

    pub fn uploads_path(&self) -> PathBuf {
        PathBuf::from(&self.uploads_dir)
    }

    /// Is production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testing_config() {
        let config = Config::for_testing("/tmp/uploads");
        assert!(config.uses_memory_database());
        assert_eq!(config.environment, "development");
        assert!(!config.is_production());
        assert_eq!(config.auth_fixed_delay_ms, 0);
        assert_eq!(config.bind_addr(), "127.0.0.1:0");
        assert!(config.jwt.secret.len() >= crate::auth::jwt::MIN_SECRET_LEN);
    }
}
