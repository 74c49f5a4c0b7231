//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require an origin and check it is a usable base URL
//! - Validate listener and metrics addresses
//! - Check that a configured asset directory exists
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::schema::ProxyConfig;
use crate::http::request::{OriginError, OriginUrl};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("origin.url is required (set ORIGIN_URL or --origin)")]
    MissingOrigin,

    #[error("origin.url is invalid: {0}")]
    InvalidOrigin(#[from] OriginError),

    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("assets.dir {0:?} is not a directory")]
    MissingAssetsDir(PathBuf),

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.origin.url.as_deref() {
        None => errors.push(ValidationError::MissingOrigin),
        Some(raw) if raw.trim().is_empty() => errors.push(ValidationError::MissingOrigin),
        Some(raw) => {
            if let Err(e) = OriginUrl::parse(raw) {
                errors.push(e.into());
            }
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if let Some(dir) = &config.assets.dir {
        if !dir.is_dir() {
            errors.push(ValidationError::MissingAssetsDir(dir.clone()));
        }
    }

    if config.limits.max_body_bytes == Some(0) {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
