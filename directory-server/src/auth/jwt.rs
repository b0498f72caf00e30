//! JWT token service
//!
//! Issues and verifies the signed, time-bound bearer tokens that gate the
//! employee API.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted secret length
pub const MIN_SECRET_LEN: usize = 32;

/// JWT configuration
///
/// Not serializable; the secret only leaves through [`JwtService`] keys.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime (minutes)
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
    /// Token audience
    pub audience: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtConfig {
    /// Load JWT settings from the environment
    ///
    /// A missing `JWT_SECRET` is only tolerated in development, where a
    /// random per-process key is generated instead.
    pub fn from_env(allow_generated_secret: bool) -> Result<Self, JwtError> {
        let secret = load_jwt_secret(allow_generated_secret)?;

        Ok(Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(60),
            issuer: std::env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "employee-directory".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "employee-directory-clients".to_string()),
        })
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (Subject)
    pub sub: String,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiry timestamp (seconds)
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Generate a random 256-bit secret
pub fn generate_secure_jwt_secret() -> Result<Vec<u8>, JwtError> {
    let rng = SystemRandom::new();
    let mut key = vec![0u8; 32];

    rng.fill(&mut key).map_err(|_| {
        JwtError::KeyGenerationFailed("Failed to generate secure random key".to_string())
    })?;

    Ok(key)
}

/// Generate a printable random secret (hex encoded, 64 chars)
pub fn generate_secure_printable_jwt_secret() -> Result<String, JwtError> {
    generate_secure_jwt_secret().map(hex::encode)
}

fn load_jwt_secret(allow_generated_secret: bool) -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => {
            if secret.len() < MIN_SECRET_LEN {
                return Err(JwtError::ConfigError(format!(
                    "JWT_SECRET must be at least {} characters long",
                    MIN_SECRET_LEN
                )));
            }
            Ok(secret)
        }
        _ if allow_generated_secret => {
            tracing::warn!(
                "JWT_SECRET not set! Generating a temporary key, tokens will not survive a restart"
            );
            generate_secure_printable_jwt_secret()
        }
        _ => Err(JwtError::ConfigError(
            "JWT_SECRET environment variable must be set outside development".to_string(),
        )),
    }
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Create a service with the given configuration
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a token for a user, valid from now
    pub fn generate_token(&self, user_id: &str) -> Result<String, JwtError> {
        self.generate_token_at(user_id, Utc::now())
    }

    /// Issue a token as if it had been issued at `issued_at`
    pub fn generate_token_at(
        &self,
        user_id: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let expiration = issued_at + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value
    ///
    /// Returns `None` without the `Bearer` scheme or with an empty token.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Verify the raw `Authorization` header of a request
    pub fn verify_bearer(&self, header: Option<&str>) -> Result<Claims, JwtError> {
        let token = header
            .and_then(Self::extract_from_header)
            .ok_or(JwtError::MissingToken)?;
        self.validate_token(token)
    }

    /// Token lifetime in seconds
    pub fn expires_in_seconds(&self) -> u64 {
        (self.config.expiration_minutes.max(0) as u64) * 60
    }
}

/// Authenticated caller, attached to the request by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// User ID
    pub id: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.sub }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            expiration_minutes: 60,
            issuer: "employee-directory".to_string(),
            audience: "employee-directory-clients".to_string(),
        })
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = service();
        let token = service.generate_token("user123").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.iss, "employee-directory");
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service();
        let issued_at = Utc::now() - Duration::minutes(61);
        let token = service.generate_token_at("user123", issued_at).unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_token_valid_until_expiry() {
        let service = service();
        let issued_at = Utc::now() - Duration::minutes(59);
        let token = service.generate_token_at("user123", issued_at).unwrap();

        assert!(service.validate_token(&token).is_ok());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let service = service();
        let token = service.generate_token("user123").unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let payload: Vec<char> = parts[1].chars().collect();
        for i in 0..payload.len() {
            let mut tampered = payload.clone();
            tampered[i] = if tampered[i] == 'A' { 'B' } else { 'A' };
            let tampered: String = tampered.into_iter().collect();
            let forged = format!("{}.{}.{}", parts[0], tampered, parts[2]);

            assert!(
                matches!(service.validate_token(&forged), Err(JwtError::InvalidToken(_))),
                "tampering position {} was not detected",
                i
            );
        }
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-that-is-long-enough-as-well".to_string(),
            ..service().config
        });
        let token = other.generate_token("user123").unwrap();

        assert!(matches!(
            service().validate_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let other = JwtService::with_config(JwtConfig {
            audience: "someone-else".to_string(),
            ..service().config
        });
        let token = other.generate_token("user123").unwrap();

        assert!(matches!(
            service().validate_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("abc"), None);
    }

    #[test]
    fn test_verify_bearer_missing() {
        let service = service();
        assert!(matches!(
            service.verify_bearer(None),
            Err(JwtError::MissingToken)
        ));
        assert!(matches!(
            service.verify_bearer(Some("Token abc")),
            Err(JwtError::MissingToken)
        ));
        assert!(matches!(
            service.verify_bearer(Some("Bearer not-a-jwt")),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_secure_key_generation() {
        let key1 = generate_secure_jwt_secret().unwrap();
        let key2 = generate_secure_jwt_secret().unwrap();

        assert_ne!(key1, key2);
        assert_eq!(key1.len(), 32);

        let printable = generate_secure_printable_jwt_secret().unwrap();
        assert_eq!(printable.len(), 64);
        assert!(printable.len() >= MIN_SECRET_LEN);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", service());
        assert!(!debug.contains("test-secret"));
    }
}
