//! Admin session guard
//!
//! State machine protecting the admin subtree: `Checking` renders nothing,
//! one role resolution decides between `Authorized` and `Unauthorized`, and
//! an unauthorized outcome redirects to the login screen replacing history.
//! The guard does not re-check within a session; a revoked role is only
//! caught on the next full mount or on the next rejected mutation.

use crate::services::auth::AuthService;

/// Guard lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Resolution in flight; the protected subtree must not render
    Checking,
    /// Admin confirmed; the protected subtree renders
    Authorized,
    /// Not an admin; redirect to login, replacing history
    Unauthorized,
}

/// Where the guard sends the caller next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    RenderProtected,
    RedirectToLogin,
}

/// Route guard for the admin subtree
#[derive(Debug, Clone)]
pub struct AdminGuard {
    state: GuardState,
}

impl AdminGuard {
    /// A freshly mounted guard, resolution not yet started
    pub fn new() -> Self {
        Self {
            state: GuardState::Checking,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Resolve the caller's admin status once.
    ///
    /// Subsequent calls return the settled state without re-resolving,
    /// matching the one-check-per-mount contract.
    pub async fn resolve(&mut self, auth: &AuthService, access_token: Option<&str>) -> GuardOutcome {
        if self.state == GuardState::Checking {
            self.state = if auth.is_admin(access_token).await {
                GuardState::Authorized
            } else {
                GuardState::Unauthorized
            };
        }

        match self.state {
            GuardState::Authorized => GuardOutcome::RenderProtected,
            _ => GuardOutcome::RedirectToLogin,
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.state == GuardState::Authorized
    }
}

impl Default for AdminGuard {
    fn default() -> Self {
        Self::new()
    }
}
