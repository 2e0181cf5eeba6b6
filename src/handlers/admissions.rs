//! Admission form handlers

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::{CreateAdmissionRequest, UpdateAdmissionStatusRequest};
use crate::services::admissions::PhotoUpload;
use crate::utils::errors::BackofficeError;

use super::{ApiError, AppState};

/// `POST /api/admissions-form` (multipart: form fields + optional `photo`)
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut photo: Option<PhotoUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BackofficeError::InvalidInput(format!("Malformed form data: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "photo" {
            let file_name = field.file_name().unwrap_or("photo").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| BackofficeError::InvalidInput(format!("Malformed photo: {}", e)))?;

            if !bytes.is_empty() {
                photo = Some(PhotoUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| BackofficeError::InvalidInput(format!("Malformed field: {}", e)))?;
            fields.insert(name, value);
        }
    }

    let request = CreateAdmissionRequest::from_form_fields(&fields)?;
    let admission = state
        .services
        .admissions_service
        .submit(request, photo)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Admission form submitted successfully",
            "data": admission,
        })),
    ))
}

/// `GET /api/admissions-form`
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let admissions = state.services.admissions_service.list().await?;
    Ok(Json(json!({
        "success": true,
        "data": admissions,
    })))
}

/// `GET /api/admissions-form/:id`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let admission = state.services.admissions_service.get(id).await?;
    Ok(Json(json!({
        "success": true,
        "data": admission,
    })))
}

/// `PUT /api/admissions-form/:id` with `{status}`
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAdmissionStatusRequest>,
) -> Result<Json<Value>, ApiError> {
    let admission = state
        .services
        .admissions_service
        .update_status(id, request.status, request.expected_updated_at)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Admission form updated successfully",
        "data": admission,
    })))
}

/// `DELETE /api/admissions-form/:id`
pub async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.services.admissions_service.delete(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Admission form deleted successfully",
    })))
}
