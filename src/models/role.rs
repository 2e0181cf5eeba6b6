//! Admin role model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The one role this application checks
pub const ADMIN_ROLE: &str = "admin";

/// A `user_roles` row mapping an authenticated identity to a role string.
///
/// Rows are provisioned out of band; this application only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: Uuid,
    pub role: String,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
