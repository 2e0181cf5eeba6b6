//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured. A missing data
//! service URL or credential is fatal at startup.

use super::Settings;
use crate::utils::errors::{BackofficeError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_data_service_config(&settings.data_service)?;
    validate_storage_config(&settings.storage)?;
    validate_school_config(&settings.school)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(BackofficeError::Config(
            "Server host is required".to_string(),
        ));
    }

    if config.port == 0 {
        return Err(BackofficeError::Config(
            "Server port must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate data service configuration
fn validate_data_service_config(config: &super::DataServiceConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(BackofficeError::Config(
            "Data service URL is required".to_string(),
        ));
    }

    if config.public_key.is_empty() {
        return Err(BackofficeError::Config(
            "Data service public key is required".to_string(),
        ));
    }

    if config.secret_key.is_empty() {
        return Err(BackofficeError::Config(
            "Data service secret key is required".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(BackofficeError::Config(
            "Data service timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate photo storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.photo_bucket.is_empty() {
        return Err(BackofficeError::Config(
            "Photo bucket name is required".to_string(),
        ));
    }

    if config.max_photo_bytes == 0 {
        return Err(BackofficeError::Config(
            "Max photo size must be greater than 0".to_string(),
        ));
    }

    if config.allowed_photo_types.is_empty() {
        return Err(BackofficeError::Config(
            "At least one allowed photo type is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate school identity configuration
fn validate_school_config(config: &super::SchoolConfig) -> Result<()> {
    if config.branch.is_empty() {
        return Err(BackofficeError::Config(
            "School branch label is required".to_string(),
        ));
    }

    if config.session.is_empty() {
        return Err(BackofficeError::Config(
            "School session label is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BackofficeError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BackofficeError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
