//! Contact message service
//!
//! Public contact-form submission plus the admin list/delete operations.
//! Messages are append-only; there is nothing to edit.

use tracing::info;
use uuid::Uuid;

use crate::models::{ContactMessage, CreateContactRequest};
use crate::services::data::{DataService, RowQuery};
use crate::utils::errors::{BackofficeError, Result};
use crate::utils::helpers;
use crate::utils::logging;

const CONTACTS_TABLE: &str = "contact_messages";

/// Service for contact messages
#[derive(Debug, Clone)]
pub struct ContactsService {
    data: DataService,
}

impl ContactsService {
    /// Create a new ContactsService instance
    pub fn new(data: DataService) -> Self {
        Self { data }
    }

    /// Store a public contact-form submission
    pub async fn submit(&self, request: CreateContactRequest) -> Result<ContactMessage> {
        self.validate_request(&request)?;

        let message: ContactMessage = self.data.insert_row(CONTACTS_TABLE, &request).await?;
        logging::log_submission("contact", message.id, false);
        Ok(message)
    }

    /// All messages, newest first
    pub async fn list(&self) -> Result<Vec<ContactMessage>> {
        let query = RowQuery::new().order_desc("created_at");
        self.data.select_rows(CONTACTS_TABLE, &query).await
    }

    /// Fetch one message by id
    pub async fn get(&self, id: Uuid) -> Result<ContactMessage> {
        let query = RowQuery::new().eq("id", id).limit(1);
        let mut rows: Vec<ContactMessage> = self.data.select_rows(CONTACTS_TABLE, &query).await?;
        rows.pop().ok_or(BackofficeError::ContactNotFound { id })
    }

    /// Delete a message by id
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let query = RowQuery::new().eq("id", id);
        self.data.delete_rows(CONTACTS_TABLE, &query).await?;
        info!(id = %id, "Contact message deleted");
        Ok(())
    }

    /// Reject incomplete submissions before any network call
    fn validate_request(&self, request: &CreateContactRequest) -> Result<()> {
        let mut missing = Vec::new();

        if request.name.trim().is_empty() {
            missing.push("name");
        }
        if request.email.trim().is_empty() {
            missing.push("email");
        }
        if request.phone.trim().is_empty() {
            missing.push("phone");
        }
        if request.subject.trim().is_empty() {
            missing.push("subject");
        }
        if request.message.trim().is_empty() {
            missing.push("message");
        }

        if !missing.is_empty() {
            return Err(BackofficeError::InvalidInput(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        if !helpers::is_valid_email(&request.email) {
            return Err(BackofficeError::InvalidInput(format!(
                "Invalid email: {}",
                request.email
            )));
        }

        Ok(())
    }
}
