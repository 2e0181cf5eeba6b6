//! Authentication and authorization service
//!
//! This service owns the role-gated admin workflow: resolving whether a
//! bearer session belongs to an admin (fail closed), the admin login flow
//! that tears down non-admin sessions, and refresh-token based session
//! persistence so an admin can resume without re-entering credentials.
//! The raw password is never stored anywhere.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::UserRole;
use crate::services::data::{AuthUser, DataService, RowQuery, Session};
use crate::utils::errors::{BackofficeError, Result};
use crate::utils::logging;

const ROLES_TABLE: &str = "user_roles";

/// An established admin session
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl AdminSession {
    fn from_session(session: Session) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            user_id: session.user.id,
            email: session.user.email,
        }
    }
}

/// Authentication service for the admin panel and the HTTP API
#[derive(Debug, Clone)]
pub struct AuthService {
    data: DataService,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(data: DataService) -> Self {
        Self { data }
    }

    /// Answer "is the caller behind this bearer token an admin?"
    ///
    /// No token, an unrecognized token, a missing role row, a non-admin
    /// role, and a lookup failure all yield false. Every call re-resolves;
    /// nothing is cached.
    pub async fn is_admin(&self, access_token: Option<&str>) -> bool {
        let Some(token) = access_token.filter(|t| !t.is_empty()) else {
            logging::log_role_check(None, false);
            return false;
        };

        let user = match self.data.current_user(token).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                logging::log_role_check(None, false);
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Identity lookup failed, treating caller as not admin");
                return false;
            }
        };

        match self.lookup_role(user.id).await {
            Ok(Some(role)) if role.is_admin() => {
                logging::log_role_check(Some(user.id), true);
                true
            }
            Ok(_) => {
                logging::log_role_check(Some(user.id), false);
                false
            }
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Role lookup failed, treating caller as not admin");
                false
            }
        }
    }

    /// Resolve the identity behind a bearer token, requiring the admin role.
    ///
    /// Used by the protected HTTP routes. Deliberately collapses "no token",
    /// "invalid token", and "valid token, wrong role" into one error.
    pub async fn require_admin(&self, access_token: Option<&str>) -> Result<AuthUser> {
        let Some(token) = access_token.filter(|t| !t.is_empty()) else {
            return Err(BackofficeError::PermissionDenied);
        };

        let user = match self.data.current_user(token).await {
            Ok(Some(user)) => user,
            _ => return Err(BackofficeError::PermissionDenied),
        };

        match self.lookup_role(user.id).await {
            Ok(Some(role)) if role.is_admin() => Ok(user),
            _ => Err(BackofficeError::PermissionDenied),
        }
    }

    /// Authenticate an admin with email and password.
    ///
    /// Successful authentication is necessary but not sufficient: the role
    /// is re-verified, and a non-admin identity is signed straight back out.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminSession> {
        let session = self.data.sign_in(email, password).await?;
        let user_id = session.user.id;

        let is_admin = matches!(
            self.lookup_role(user_id).await,
            Ok(Some(role)) if role.is_admin()
        );

        if !is_admin {
            info!(user_id = %user_id, "Authenticated identity is not an admin, signing out");
            self.data.sign_out(&session.access_token).await?;
            return Err(BackofficeError::AccessDenied);
        }

        logging::log_admin_action(user_id, "login", None);
        Ok(AdminSession::from_session(session))
    }

    /// Resume a previous admin session from a persisted refresh token.
    ///
    /// The refreshed identity goes through the same role gate as a fresh
    /// login; a revoked role invalidates the stored token.
    pub async fn resume(&self, store: &SessionStore) -> Result<AdminSession> {
        let Some(refresh_token) = store.load().await? else {
            return Err(BackofficeError::Authentication(
                "No saved session".to_string(),
            ));
        };

        let session = match self.data.refresh_session(&refresh_token).await {
            Ok(session) => session,
            Err(e) => {
                store.clear().await?;
                return Err(e);
            }
        };

        let is_admin = matches!(
            self.lookup_role(session.user.id).await,
            Ok(Some(role)) if role.is_admin()
        );

        if !is_admin {
            self.data.sign_out(&session.access_token).await?;
            store.clear().await?;
            return Err(BackofficeError::AccessDenied);
        }

        let session = AdminSession::from_session(session);
        store.save(&session.refresh_token).await?;
        Ok(session)
    }

    /// Revoke a session and forget any persisted refresh token
    pub async fn logout(&self, session: &AdminSession, store: &SessionStore) -> Result<()> {
        self.data.sign_out(&session.access_token).await?;
        store.clear().await?;
        logging::log_admin_action(session.user_id, "logout", None);
        Ok(())
    }

    /// Look up the role row for an identity
    async fn lookup_role(&self, user_id: Uuid) -> Result<Option<UserRole>> {
        debug!(user_id = %user_id, "Looking up role row");
        let query = RowQuery::new().eq("user_id", user_id).limit(1);
        let mut rows: Vec<UserRole> = self.data.select_rows(ROLES_TABLE, &query).await?;
        Ok(rows.pop())
    }
}

/// Persisted session state.
///
/// Only the refresh token is written, never the credentials that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    refresh_token: String,
}

/// File-backed store for the admin refresh token
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist a refresh token for later resumption
    pub async fn save(&self, refresh_token: &str) -> Result<()> {
        let persisted = PersistedSession {
            refresh_token: refresh_token.to_string(),
        };
        let contents = serde_json::to_string(&persisted)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }

    /// Load the persisted refresh token, if any
    pub async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => match serde_json::from_str::<PersistedSession>(&contents) {
                Ok(persisted) => Ok(Some(persisted.refresh_token)),
                Err(_) => {
                    // Corrupt session file; drop it rather than fail resume.
                    self.clear().await?;
                    Ok(None)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Forget the persisted session
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
