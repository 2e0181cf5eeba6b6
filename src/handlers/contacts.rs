//! Contact form handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::models::CreateContactRequest;

use super::{ApiError, AppState};

/// `POST /api/contact`
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state.services.contacts_service.submit(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Message sent successfully",
        })),
    ))
}
