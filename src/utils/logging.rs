//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the back-office application.

use crate::config::LoggingConfig;
use crate::utils::errors::{BackofficeError, Result};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging based on configuration.
///
/// The returned guard owns the file writer's background worker; the caller
/// must hold it for the lifetime of the process or file output stops.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "mia-backoffice.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .try_init()
        .map_err(|e| BackofficeError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions with structured data
pub fn log_admin_action(admin_id: uuid::Uuid, action: &str, target: Option<&str>) {
    warn!(
        admin_id = %admin_id,
        action = action,
        target = target,
        "Admin action performed"
    );
}

/// Log public form submissions
pub fn log_submission(kind: &str, id: uuid::Uuid, has_photo: bool) {
    info!(
        kind = kind,
        id = %id,
        has_photo = has_photo,
        "Public submission stored"
    );
}

/// Log role resolution outcomes
pub fn log_role_check(user_id: Option<uuid::Uuid>, is_admin: bool) {
    if is_admin {
        info!(user_id = ?user_id, "Role check: admin confirmed");
    } else {
        info!(user_id = ?user_id, "Role check: not admin");
    }
}

/// Log data service errors with context
pub fn log_data_service_error(operation: &str, table: &str, error: &str) {
    tracing::error!(
        operation = operation,
        table = table,
        error = error,
        "Data service operation failed"
    );
}
