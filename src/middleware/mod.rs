//! HTTP middleware
//!
//! Request-level concerns shared by the API handlers.

pub mod auth;

pub use auth::bearer_token;
