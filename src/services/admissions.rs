//! Admission application service
//!
//! Public submission flow (validation, photo upload, row insert) and the
//! admin review operations over stored applications. Photo upload and row
//! insert are two independent calls with no atomicity guarantee; a photo
//! uploaded before a failing insert is not rolled back. Deleting an
//! application best-effort deletes its photo object afterwards so records
//! do not leak storage.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{SchoolConfig, StorageConfig};
use crate::models::{Admission, AdmissionStatus, CreateAdmissionRequest};
use crate::services::data::{DataService, RowQuery};
use crate::utils::errors::{BackofficeError, Result};
use crate::utils::helpers;
use crate::utils::logging;

const ADMISSIONS_TABLE: &str = "admissions_form";

/// An uploaded photo as received from the form
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Insert body for a new application row
#[derive(Debug, Serialize)]
struct NewAdmissionRow<'a> {
    branch: &'a str,
    session: &'a str,
    class: &'a str,
    student_name: &'a str,
    dob: chrono::NaiveDate,
    gender: &'a str,
    caste: Option<&'a str>,
    religion: Option<&'a str>,
    father_name: &'a str,
    father_qualification: Option<&'a str>,
    father_occupation: Option<&'a str>,
    father_occupation_details: Option<&'a str>,
    father_income: Option<f64>,
    mother_name: &'a str,
    mother_qualification: Option<&'a str>,
    mother_occupation: Option<&'a str>,
    mother_occupation_details: Option<&'a str>,
    mother_income: Option<f64>,
    mobile_number: &'a str,
    contact_number: Option<&'a str>,
    email: Option<&'a str>,
    present_address: &'a str,
    permanent_address: &'a str,
    siblings: Option<&'a str>,
    guardian: Option<&'a str>,
    photo_url: Option<String>,
    status: AdmissionStatus,
}

/// Service for admission applications
#[derive(Debug, Clone)]
pub struct AdmissionsService {
    data: DataService,
    storage: StorageConfig,
    school: SchoolConfig,
}

impl AdmissionsService {
    /// Create a new AdmissionsService instance
    pub fn new(data: DataService, storage: StorageConfig, school: SchoolConfig) -> Self {
        Self {
            data,
            storage,
            school,
        }
    }

    /// Submit a public admission application.
    ///
    /// All validation runs before any network call. The photo, when present,
    /// is uploaded under a collision-resistant generated key and its public
    /// URL stored on the inserted row.
    pub async fn submit(
        &self,
        request: CreateAdmissionRequest,
        photo: Option<PhotoUpload>,
    ) -> Result<Admission> {
        self.validate_request(&request)?;
        if let Some(photo) = &photo {
            self.validate_photo(photo)?;
        }
        let dob = request.dob.ok_or_else(|| {
            BackofficeError::InvalidInput("Missing required fields: dob".to_string())
        })?;

        let photo_url = match &photo {
            Some(photo) => {
                let key = helpers::generate_photo_filename(&photo.file_name);
                self.data
                    .upload_object(
                        &self.storage.photo_bucket,
                        &key,
                        photo.bytes.clone(),
                        &photo.content_type,
                    )
                    .await?;
                Some(self.data.public_url(&self.storage.photo_bucket, &key))
            }
            None => None,
        };

        let row = NewAdmissionRow {
            branch: request.branch.as_deref().unwrap_or(&self.school.branch),
            session: request.session.as_deref().unwrap_or(&self.school.session),
            class: &request.class,
            student_name: &request.student_name,
            dob,
            gender: &request.gender,
            caste: request.caste.as_deref(),
            religion: request.religion.as_deref(),
            father_name: &request.father_name,
            father_qualification: request.father_qualification.as_deref(),
            father_occupation: request.father_occupation.as_deref(),
            father_occupation_details: request.father_occupation_details.as_deref(),
            father_income: request.father_income,
            mother_name: &request.mother_name,
            mother_qualification: request.mother_qualification.as_deref(),
            mother_occupation: request.mother_occupation.as_deref(),
            mother_occupation_details: request.mother_occupation_details.as_deref(),
            mother_income: request.mother_income,
            mobile_number: &request.mobile_number,
            contact_number: request.contact_number.as_deref(),
            email: request.email.as_deref(),
            present_address: &request.present_address,
            permanent_address: &request.permanent_address,
            siblings: request.siblings.as_deref(),
            guardian: request.guardian.as_deref(),
            photo_url,
            status: AdmissionStatus::New,
        };

        let admission: Admission = self.data.insert_row(ADMISSIONS_TABLE, &row).await?;
        logging::log_submission("admission", admission.id, photo.is_some());
        Ok(admission)
    }

    /// All applications, newest first
    pub async fn list(&self) -> Result<Vec<Admission>> {
        let query = RowQuery::new().order_desc("created_at");
        self.data.select_rows(ADMISSIONS_TABLE, &query).await
    }

    /// Fetch one application by id
    pub async fn get(&self, id: Uuid) -> Result<Admission> {
        let query = RowQuery::new().eq("id", id).limit(1);
        let mut rows: Vec<Admission> = self.data.select_rows(ADMISSIONS_TABLE, &query).await?;
        rows.pop()
            .ok_or(BackofficeError::AdmissionNotFound { id })
    }

    /// Change an application's review status.
    ///
    /// Idempotent: applying the same status twice yields the same row state.
    /// When `expected_updated_at` is supplied the write only lands if the row
    /// has not changed since it was loaded; a mismatch yields `Conflict`.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: AdmissionStatus,
        expected_updated_at: Option<DateTime<Utc>>,
    ) -> Result<Admission> {
        let mut query = RowQuery::new().eq("id", id);
        if let Some(expected) = expected_updated_at {
            query = query.eq("updated_at", expected.to_rfc3339());
        }

        let body = serde_json::json!({
            "status": status,
            "updated_at": Utc::now(),
        });

        let mut rows: Vec<Admission> = self
            .data
            .update_rows(ADMISSIONS_TABLE, &query, &body)
            .await?;

        match rows.pop() {
            Some(admission) => {
                debug!(id = %id, status = %status, "Admission status updated");
                Ok(admission)
            }
            None => {
                // Nothing matched: the row is gone, or the precondition failed.
                match self.get(id).await {
                    Ok(_) => Err(BackofficeError::Conflict(
                        "Admission was modified by another session".to_string(),
                    )),
                    Err(_) => Err(BackofficeError::AdmissionNotFound { id }),
                }
            }
        }
    }

    /// Delete an application and best-effort delete its photo object.
    ///
    /// Photo cleanup failures are logged, never surfaced: the record delete
    /// already succeeded and must not be reported as failed.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let admission = self.get(id).await?;

        let query = RowQuery::new().eq("id", id);
        self.data.delete_rows(ADMISSIONS_TABLE, &query).await?;
        info!(id = %id, "Admission deleted");

        if let Some(photo_url) = &admission.photo_url {
            match helpers::object_key_from_url(photo_url, &self.storage.photo_bucket) {
                Some(key) => {
                    if let Err(e) = self
                        .data
                        .delete_object(&self.storage.photo_bucket, &key)
                        .await
                    {
                        warn!(id = %id, key = key, error = %e, "Photo cleanup failed, object orphaned");
                    }
                }
                None => {
                    warn!(id = %id, photo_url = photo_url, "Photo URL outside configured bucket, skipping cleanup");
                }
            }
        }

        Ok(())
    }

    /// Reject incomplete or malformed submissions before any network call
    fn validate_request(&self, request: &CreateAdmissionRequest) -> Result<()> {
        let mut missing = Vec::new();

        if request.class.trim().is_empty() {
            missing.push("class");
        }
        if request.student_name.trim().is_empty() {
            missing.push("student_name");
        }
        if request.dob.is_none() {
            missing.push("dob");
        }
        if request.gender.trim().is_empty() {
            missing.push("gender");
        }
        if request.father_name.trim().is_empty() {
            missing.push("father_name");
        }
        if request.mother_name.trim().is_empty() {
            missing.push("mother_name");
        }
        if request.mobile_number.trim().is_empty() {
            missing.push("mobile_number");
        }
        if request.present_address.trim().is_empty() {
            missing.push("present_address");
        }
        if request.permanent_address.trim().is_empty() {
            missing.push("permanent_address");
        }

        if !missing.is_empty() {
            return Err(BackofficeError::InvalidInput(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        for (label, income) in [
            ("father_income", request.father_income),
            ("mother_income", request.mother_income),
        ] {
            if let Some(value) = income {
                if value < 0.0 {
                    return Err(BackofficeError::InvalidInput(format!(
                        "{} must not be negative",
                        label
                    )));
                }
            }
        }

        if let Some(email) = &request.email {
            if !helpers::is_valid_email(email) {
                return Err(BackofficeError::InvalidInput(format!(
                    "Invalid email: {}",
                    email
                )));
            }
        }

        Ok(())
    }

    /// Client-side photo constraints: size cap and MIME allow-list
    fn validate_photo(&self, photo: &PhotoUpload) -> Result<()> {
        if photo.bytes.len() as u64 > self.storage.max_photo_bytes {
            return Err(BackofficeError::InvalidInput(format!(
                "Photo exceeds {} bytes",
                self.storage.max_photo_bytes
            )));
        }

        let content_type = photo.content_type.to_lowercase();
        if !self
            .storage
            .allowed_photo_types
            .iter()
            .any(|allowed| allowed == &content_type)
        {
            return Err(BackofficeError::InvalidInput(format!(
                "Photo type not allowed: {}",
                photo.content_type
            )));
        }

        Ok(())
    }
}
