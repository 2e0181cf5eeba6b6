//! Notice board service
//!
//! Public read path (all notices ordered by their effective date, newest
//! first, no pagination) and the admin create/edit/delete operations. Every
//! mutation re-verifies the caller's admin role through the auth service.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::models::{CreateNoticeRequest, Notice, UpdateNoticeRequest, ValidNotice};
use crate::services::auth::AuthService;
use crate::services::data::{DataService, RowQuery};
use crate::utils::errors::{BackofficeError, Result};
use crate::utils::logging;

const NOTICES_TABLE: &str = "notices";

/// Insert body for a new notice row
#[derive(Debug, Serialize)]
struct NewNoticeRow {
    #[serde(flatten)]
    notice: ValidNotice,
    created_by: Uuid,
}

/// Service for the notice board
#[derive(Debug, Clone)]
pub struct NoticesService {
    data: DataService,
    auth: AuthService,
}

impl NoticesService {
    /// Create a new NoticesService instance
    pub fn new(data: DataService, auth: AuthService) -> Self {
        Self { data, auth }
    }

    /// All notices ordered by notice date descending (public read path)
    pub async fn list(&self) -> Result<Vec<Notice>> {
        let query = RowQuery::new().order_desc("notice_date");
        self.data.select_rows(NOTICES_TABLE, &query).await
    }

    /// Fetch one notice by id
    pub async fn get(&self, id: Uuid) -> Result<Notice> {
        let query = RowQuery::new().eq("id", id).limit(1);
        let mut rows: Vec<Notice> = self.data.select_rows(NOTICES_TABLE, &query).await?;
        rows.pop().ok_or(BackofficeError::NoticeNotFound { id })
    }

    /// Create a notice. Admin only; all four fields are required.
    pub async fn create(
        &self,
        access_token: Option<&str>,
        request: CreateNoticeRequest,
    ) -> Result<Notice> {
        let admin = self.auth.require_admin(access_token).await?;
        let notice = request.validate()?;

        let row = NewNoticeRow {
            notice,
            created_by: admin.id,
        };
        let notice: Notice = self.data.insert_row(NOTICES_TABLE, &row).await?;
        logging::log_admin_action(admin.id, "create_notice", Some(&notice.id.to_string()));
        Ok(notice)
    }

    /// Edit a notice in full or in part. Admin only.
    pub async fn update(
        &self,
        access_token: Option<&str>,
        id: Uuid,
        request: UpdateNoticeRequest,
    ) -> Result<Notice> {
        let admin = self.auth.require_admin(access_token).await?;

        if request.is_empty() {
            return Err(BackofficeError::InvalidInput(
                "No fields to update".to_string(),
            ));
        }

        let query = RowQuery::new().eq("id", id);
        let mut rows: Vec<Notice> = self.data.update_rows(NOTICES_TABLE, &query, &request).await?;

        match rows.pop() {
            Some(notice) => {
                logging::log_admin_action(admin.id, "update_notice", Some(&id.to_string()));
                Ok(notice)
            }
            None => Err(BackofficeError::NoticeNotFound { id }),
        }
    }

    /// Delete a notice by id. Admin only.
    pub async fn delete(&self, access_token: Option<&str>, id: Uuid) -> Result<()> {
        let admin = self.auth.require_admin(access_token).await?;

        let query = RowQuery::new().eq("id", id);
        self.data.delete_rows(NOTICES_TABLE, &query).await?;

        info!(id = %id, "Notice deleted");
        logging::log_admin_action(admin.id, "delete_notice", Some(&id.to_string()));
        Ok(())
    }
}
