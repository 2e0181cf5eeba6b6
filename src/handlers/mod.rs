//! HTTP API handlers
//!
//! The thin JSON API over the back-office services. Every response carries a
//! `success` boolean; errors carry a `message` and, for unexpected failures,
//! the underlying error string. No versioning, no pagination, no rate
//! limiting.

pub mod admissions;
pub mod contacts;
pub mod health;
pub mod notices;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::ServiceFactory;
use crate::utils::errors::BackofficeError;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
}

impl AppState {
    pub fn new(services: ServiceFactory) -> Self {
        Self {
            services: Arc::new(services),
        }
    }
}

/// Build the API router with all routes mounted under `/api`
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/admissions-form", post(admissions::create))
        .route("/api/admissions-form", get(admissions::list))
        .route("/api/admissions-form/:id", get(admissions::get_one))
        .route("/api/admissions-form/:id", put(admissions::update_status))
        .route("/api/admissions-form/:id", delete(admissions::delete_one))
        .route("/api/contact", post(contacts::create))
        .route("/api/notices", get(notices::list))
        .route("/api/notices", post(notices::create))
        .route("/api/notices/:id", delete(notices::delete_one))
        // Form fields plus a photo of up to 2 MiB
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error wrapper converting service failures into JSON error responses
#[derive(Debug)]
pub struct ApiError(pub BackofficeError);

impl From<BackofficeError> for ApiError {
    fn from(err: BackofficeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, body) = match &err {
            BackofficeError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                serde_json::json!({
                    "success": false,
                    "message": "Admin access required",
                }),
            ),
            BackofficeError::AccessDenied => (
                StatusCode::FORBIDDEN,
                serde_json::json!({
                    "success": false,
                    "message": err.to_string(),
                }),
            ),
            BackofficeError::Authentication(message) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({
                    "success": false,
                    "message": message,
                }),
            ),
            BackofficeError::InvalidInput(message) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "success": false,
                    "message": message,
                }),
            ),
            BackofficeError::AdmissionNotFound { .. }
            | BackofficeError::NoticeNotFound { .. }
            | BackofficeError::ContactNotFound { .. } => (
                StatusCode::NOT_FOUND,
                serde_json::json!({
                    "success": false,
                    "message": err.to_string(),
                }),
            ),
            BackofficeError::Conflict(message) => (
                StatusCode::CONFLICT,
                serde_json::json!({
                    "success": false,
                    "message": message,
                }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "success": false,
                    "message": "Something went wrong!",
                    "error": err.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
