//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod admission;
pub mod contact;
pub mod notice;
pub mod role;

// Re-export commonly used models
pub use admission::{
    Admission, AdmissionStatus, CreateAdmissionRequest, UpdateAdmissionStatusRequest,
};
pub use contact::{ContactMessage, CreateContactRequest};
pub use notice::{CreateNoticeRequest, Notice, NoticeType, UpdateNoticeRequest, ValidNotice};
pub use role::{UserRole, ADMIN_ROLE};
