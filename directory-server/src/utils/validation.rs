//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use validator::ValidateEmail;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names, departments, positions
pub const MAX_NAME_LEN: usize = 200;

/// Usernames
pub const MAX_USERNAME_LEN: usize = 64;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 1;
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
///
/// Returns the trimmed value.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")).with_detail("field", field));
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(trimmed.to_string())
}

/// Normalize and validate an email address (trimmed, lowercased).
pub fn validate_email(value: &str, field: &str) -> Result<String, AppError> {
    let email = validate_required_text(value, field, MAX_EMAIL_LEN)?.to_lowercase();
    if !email.validate_email() {
        return Err(
            AppError::validation(format!("{field} is not a valid email address"))
                .with_detail("field", field),
        );
    }
    Ok(email)
}

/// Validate a password length (not trimmed).
pub fn validate_password(value: &str) -> Result<(), AppError> {
    let len = value.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
        ))
        .with_detail("field", "password"));
    }
    Ok(())
}

/// Validate a salary: finite and non-negative.
pub fn validate_salary(value: f64) -> Result<f64, AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation("salary must be a non-negative number")
            .with_detail("field", "salary"));
    }
    Ok(value)
}
