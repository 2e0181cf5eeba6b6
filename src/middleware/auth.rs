//! Bearer token extraction
//!
//! Protected routes carry an opaque bearer token proving identity; the role
//! behind it is resolved per request by the auth service. No distinction is
//! made between a missing, malformed, and unrecognized token — all of them
//! end in the same authorization failure downstream.

use axum::http::{header, HeaderMap};

/// Pull the bearer token out of the Authorization header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
