//! Admin view state management
//!
//! This module holds the client-facing state contracts of the admin panel:
//! the session guard state machine and the per-screen list reconciliation.

pub mod guard;
pub mod listing;

pub use guard::{AdminGuard, GuardOutcome, GuardState};
pub use listing::{HasId, ListView};
