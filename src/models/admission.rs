//! Admission form model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::{BackofficeError, Result};

/// Review progress of an admission application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AdmissionStatus {
    #[default]
    New,
    Reviewed,
    Approved,
    Rejected,
}

impl AdmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionStatus::New => "New",
            AdmissionStatus::Reviewed => "Reviewed",
            AdmissionStatus::Approved => "Approved",
            AdmissionStatus::Rejected => "Rejected",
        }
    }

    /// All valid status values, in review order
    pub fn all() -> [AdmissionStatus; 4] {
        [
            AdmissionStatus::New,
            AdmissionStatus::Reviewed,
            AdmissionStatus::Approved,
            AdmissionStatus::Rejected,
        ]
    }
}

impl std::fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdmissionStatus {
    type Err = BackofficeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "New" => Ok(AdmissionStatus::New),
            "Reviewed" => Ok(AdmissionStatus::Reviewed),
            "Approved" => Ok(AdmissionStatus::Approved),
            "Rejected" => Ok(AdmissionStatus::Rejected),
            other => Err(BackofficeError::InvalidInput(format!(
                "Invalid admission status: {}",
                other
            ))),
        }
    }
}

/// A stored admission application (`admissions_form` row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admission {
    pub id: Uuid,
    pub branch: String,
    pub session: String,
    pub class: String,
    pub student_name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub caste: Option<String>,
    pub religion: Option<String>,
    pub father_name: String,
    pub father_qualification: Option<String>,
    pub father_occupation: Option<String>,
    pub father_occupation_details: Option<String>,
    pub father_income: Option<f64>,
    pub mother_name: String,
    pub mother_qualification: Option<String>,
    pub mother_occupation: Option<String>,
    pub mother_occupation_details: Option<String>,
    pub mother_income: Option<f64>,
    pub mobile_number: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub present_address: String,
    pub permanent_address: String,
    pub siblings: Option<String>,
    pub guardian: Option<String>,
    pub photo_url: Option<String>,
    pub status: AdmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields collected from the public admission form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateAdmissionRequest {
    pub branch: Option<String>,
    pub session: Option<String>,
    pub class: String,
    pub student_name: String,
    pub dob: Option<NaiveDate>,
    pub gender: String,
    pub caste: Option<String>,
    pub religion: Option<String>,
    pub father_name: String,
    pub father_qualification: Option<String>,
    pub father_occupation: Option<String>,
    pub father_occupation_details: Option<String>,
    pub father_income: Option<f64>,
    pub mother_name: String,
    pub mother_qualification: Option<String>,
    pub mother_occupation: Option<String>,
    pub mother_occupation_details: Option<String>,
    pub mother_income: Option<f64>,
    pub mobile_number: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub present_address: String,
    pub permanent_address: String,
    pub siblings: Option<String>,
    pub guardian: Option<String>,
}

impl CreateAdmissionRequest {
    /// Build a request from flat multipart form fields.
    ///
    /// Blank strings are treated as absent so empty optional inputs do not
    /// turn into empty-string columns.
    pub fn from_form_fields(fields: &HashMap<String, String>) -> Result<Self> {
        let text = |key: &str| -> Option<String> {
            fields
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let dob = match text("dob") {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                BackofficeError::InvalidInput(format!("Invalid date of birth: {}", raw))
            })?),
            None => None,
        };

        let income = |key: &str| -> Result<Option<f64>> {
            match text(key) {
                Some(raw) => raw
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| BackofficeError::InvalidInput(format!("Invalid {}: {}", key, raw))),
                None => Ok(None),
            }
        };

        Ok(Self {
            branch: text("branch"),
            session: text("session"),
            class: text("class").unwrap_or_default(),
            student_name: text("student_name").unwrap_or_default(),
            dob,
            gender: text("gender").unwrap_or_default(),
            caste: text("caste"),
            religion: text("religion"),
            father_name: text("father_name").unwrap_or_default(),
            father_qualification: text("father_qualification"),
            father_occupation: text("father_occupation"),
            father_occupation_details: text("father_occupation_details"),
            father_income: income("father_income")?,
            mother_name: text("mother_name").unwrap_or_default(),
            mother_qualification: text("mother_qualification"),
            mother_occupation: text("mother_occupation"),
            mother_occupation_details: text("mother_occupation_details"),
            mother_income: income("mother_income")?,
            mobile_number: text("mobile_number").unwrap_or_default(),
            contact_number: text("contact_number"),
            email: text("email"),
            present_address: text("present_address").unwrap_or_default(),
            permanent_address: text("permanent_address").unwrap_or_default(),
            siblings: text("siblings"),
            guardian: text("guardian"),
        })
    }
}

/// Status change applied by an admin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAdmissionStatusRequest {
    pub status: AdmissionStatus,
    /// Optional write precondition; a mismatch means another admin changed
    /// the row since it was loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_updated_at: Option<DateTime<Utc>>,
}
