//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub data_service: DataServiceConfig,
    pub storage: StorageConfig,
    pub school: SchoolConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Hosted data service configuration
///
/// The public key is the low-privilege credential intended for browser-facing
/// flows; the secret key is the higher-privilege credential used by this
/// process for row and storage access.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataServiceConfig {
    pub url: String,
    pub public_key: String,
    pub secret_key: String,
    pub timeout_seconds: u64,
}

/// Photo storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub photo_bucket: String,
    pub max_photo_bytes: u64,
    pub allowed_photo_types: Vec<String>,
}

/// School identity defaults applied to admission submissions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchoolConfig {
    pub branch: String,
    pub session: String,
}

/// Admin session persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub session_file: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("MIA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BackofficeError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            data_service: DataServiceConfig {
                url: String::new(),
                public_key: String::new(),
                secret_key: String::new(),
                timeout_seconds: 10,
            },
            storage: StorageConfig {
                photo_bucket: "admission-photos".to_string(),
                max_photo_bytes: 2 * 1024 * 1024,
                allowed_photo_types: vec![
                    "image/jpeg".to_string(),
                    "image/jpg".to_string(),
                    "image/png".to_string(),
                ],
            },
            school: SchoolConfig {
                branch: "Mothers International Academy".to_string(),
                session: "2025-2026".to_string(),
            },
            auth: AuthConfig {
                session_file: ".admin-session".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/mia-backoffice".to_string(),
            },
        }
    }
}
