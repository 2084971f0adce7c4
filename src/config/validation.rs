//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the API endpoint URL and token presence
//! - Validate value ranges (timeout > 0, known log levels)
//!
//! Returns all validation errors, not just the first.

use thiserror::Error;

use crate::config::schema::ConnectConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("api.endpoint '{0}' is not a valid URL")]
    InvalidEndpoint(String),

    #[error("api token missing (set HCLOUD_TOKEN)")]
    MissingToken,

    #[error("api.timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate a fully assembled configuration.
pub fn validate_config(config: &ConnectConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.api.endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidEndpoint(config.api.endpoint.clone())),
    }

    if config.api.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
        errors.push(ValidationError::MissingToken);
    }

    if config.api.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
