//! Services module
//!
//! This module contains business logic services

pub mod admissions;
pub mod auth;
pub mod contacts;
pub mod data;
pub mod documents;
pub mod notices;

// Re-export commonly used services
pub use admissions::{AdmissionsService, PhotoUpload};
pub use auth::{AdminSession, AuthService, SessionStore};
pub use contacts::ContactsService;
pub use data::{AuthUser, DataService, RowQuery, Session, SortOrder};
pub use documents::{admission_summary, AdmissionSummary, CopyKind, SummaryCopy};
pub use notices::NoticesService;

use crate::config::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub data_service: DataService,
    pub auth_service: AuthService,
    pub admissions_service: AdmissionsService,
    pub contacts_service: ContactsService,
    pub notices_service: NoticesService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings) -> Result<Self> {
        let data_service = DataService::new(&settings.data_service)?;
        let auth_service = AuthService::new(data_service.clone());
        let admissions_service = AdmissionsService::new(
            data_service.clone(),
            settings.storage.clone(),
            settings.school.clone(),
        );
        let contacts_service = ContactsService::new(data_service.clone());
        let notices_service = NoticesService::new(data_service.clone(), auth_service.clone());

        Ok(Self {
            data_service,
            auth_service,
            admissions_service,
            contacts_service,
            notices_service,
        })
    }
}
