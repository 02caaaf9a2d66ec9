/// Validation utilities for user input and configuration

use crate::core::error::{AppError, Result};

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    /// Turn a failed check into `AppError::Validation`.
    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(error) if !self.is_valid => Err(AppError::Validation(error)),
            _ => Ok(()),
        }
    }
}

/// A comment must have something besides whitespace
pub fn validate_comment(text: &str) -> ValidationResult {
    if text.trim().is_empty() {
        return ValidationResult::err("Comment cannot be empty");
    }

    ValidationResult::ok()
}

/// Usernames read from the session store must be non-blank and single-line
pub fn validate_username(username: &str) -> ValidationResult {
    if username.trim().is_empty() {
        return ValidationResult::err("Username is required");
    }

    if username.contains(['\n', '\r']) {
        return ValidationResult::err("Username cannot span lines");
    }

    ValidationResult::ok()
}

/// Configured endpoints must be absolute http(s) URLs with a host
pub fn validate_base_url(name: &str, url: &str) -> ValidationResult {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        None => ValidationResult::err(format!("{} must start with http:// or https://: {}", name, url)),
        Some(host) if host.trim_matches('/').is_empty() => {
            ValidationResult::err(format!("{} has no host: {}", name, url))
        }
        Some(_) => ValidationResult::ok(),
    }
}
