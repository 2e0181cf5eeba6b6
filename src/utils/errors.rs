//! Error handling for the back office
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for back-office operations
#[derive(Error, Debug)]
pub enum BackofficeError {
    #[error("Data service error: {0}")]
    DataService(#[from] DataServiceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Access denied. Admin only.")]
    AccessDenied,

    #[error("Admin access required")]
    PermissionDenied,

    #[error("Admission form not found: {id}")]
    AdmissionNotFound { id: uuid::Uuid },

    #[error("Notice not found: {id}")]
    NoticeNotFound { id: uuid::Uuid },

    #[error("Contact message not found: {id}")]
    ContactNotFound { id: uuid::Uuid },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Errors raised by the hosted data service client
#[derive(Error, Debug)]
pub enum DataServiceError {
    #[error("Data service request failed: {0}")]
    RequestFailed(String),

    #[error("Data service timeout")]
    Timeout,

    #[error("Invalid data service response: {0}")]
    InvalidResponse(String),

    #[error("Data service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for back-office operations
pub type Result<T> = std::result::Result<T, BackofficeError>;

/// Result type alias for data service operations
pub type DataServiceResult<T> = std::result::Result<T, DataServiceError>;

impl BackofficeError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            BackofficeError::DataService(_) => true,
            BackofficeError::Config(_) => false,
            BackofficeError::Authentication(_) => false,
            BackofficeError::AccessDenied => false,
            BackofficeError::PermissionDenied => false,
            BackofficeError::AdmissionNotFound { .. } => false,
            BackofficeError::NoticeNotFound { .. } => false,
            BackofficeError::ContactNotFound { .. } => false,
            BackofficeError::InvalidInput(_) => false,
            BackofficeError::Conflict(_) => true,
            BackofficeError::Http(_) => true,
            BackofficeError::Serialization(_) => false,
            BackofficeError::Io(_) => true,
            BackofficeError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BackofficeError::Config(_) => ErrorSeverity::Critical,
            BackofficeError::Authentication(_) => ErrorSeverity::Warning,
            BackofficeError::AccessDenied => ErrorSeverity::Warning,
            BackofficeError::PermissionDenied => ErrorSeverity::Warning,
            BackofficeError::InvalidInput(_) => ErrorSeverity::Info,
            BackofficeError::Conflict(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
