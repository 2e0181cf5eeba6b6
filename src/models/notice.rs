//! Notice board model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::BackofficeError;

/// Display category of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeType {
    Important,
    Event,
    Meeting,
    Holiday,
}

impl NoticeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeType::Important => "important",
            NoticeType::Event => "event",
            NoticeType::Meeting => "meeting",
            NoticeType::Holiday => "holiday",
        }
    }
}

impl std::fmt::Display for NoticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NoticeType {
    type Err = BackofficeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "important" => Ok(NoticeType::Important),
            "event" => Ok(NoticeType::Event),
            "meeting" => Ok(NoticeType::Meeting),
            "holiday" => Ok(NoticeType::Holiday),
            other => Err(BackofficeError::InvalidInput(format!(
                "Invalid notice type: {}",
                other
            ))),
        }
    }
}

/// A stored notice (`notices` row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: NoticeType,
    /// Effective date chosen by the admin, distinct from `created_at`
    pub notice_date: NaiveDate,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Incoming notice payload.
///
/// All fields are lenient at the wire level, the category included, so a
/// missing or unknown value is reported as a 400 rather than a
/// deserialization failure; `validate` enforces presence and shape.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateNoticeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub notice_date: Option<NaiveDate>,
}

impl CreateNoticeRequest {
    /// Check all required fields are present, non-blank, and well-formed
    pub fn validate(&self) -> Result<ValidNotice, BackofficeError> {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        let kind = self
            .kind
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty());

        match (title, description, kind, self.notice_date) {
            (Some(title), Some(description), Some(kind), Some(notice_date)) => Ok(ValidNotice {
                title: title.to_string(),
                description: description.to_string(),
                kind: kind.parse()?,
                notice_date,
            }),
            _ => Err(BackofficeError::InvalidInput(
                "Missing required fields".to_string(),
            )),
        }
    }
}

/// A fully validated notice payload
#[derive(Debug, Clone, Serialize)]
pub struct ValidNotice {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: NoticeType,
    pub notice_date: NaiveDate,
}

/// Full-field edit applied by an admin; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateNoticeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<NoticeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_date: Option<NaiveDate>,
}

impl UpdateNoticeRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.kind.is_none()
            && self.notice_date.is_none()
    }
}
