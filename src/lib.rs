//! Mother's International Academy back office
//!
//! This library consolidates the school site's back-office logic into one
//! authoritative set of modules: a typed client for the hosted data service,
//! the role-gated admin workflow, public submission flows for admissions and
//! contact messages, notice management, and the thin HTTP API served on top.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{BackofficeError, Result};

// Re-export main components for easy access
pub use services::{DataService, ServiceFactory};
pub use state::{AdminGuard, GuardState, ListView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
