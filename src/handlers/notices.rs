//! Notice board handlers
//!
//! Reads are public; mutations require a bearer token whose identity holds
//! the admin role. A failed role check is a 403 regardless of whether the
//! token was missing, invalid, or simply not an admin's.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::middleware::bearer_token;
use crate::models::CreateNoticeRequest;

use super::{ApiError, AppState};

/// `GET /api/notices`
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let notices = state.services.notices_service.list().await?;
    Ok(Json(json!({
        "success": true,
        "data": notices,
    })))
}

/// `POST /api/notices` (admin only)
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateNoticeRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let token = bearer_token(&headers);
    state
        .services
        .notices_service
        .create(token.as_deref(), request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true })),
    ))
}

/// `DELETE /api/notices/:id` (admin only)
pub async fn delete_one(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers);
    state
        .services
        .notices_service
        .delete(token.as_deref(), id)
        .await?;

    Ok(Json(json!({ "success": true })))
}
