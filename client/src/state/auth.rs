//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors the `authflow` store into a Leptos signal so views re-render on
//! status changes. Views read this; only the coordinator writes status.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authflow::UserProfile;

/// Authentication status plus the user projection shown on the dashboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
}

impl AuthState {
    /// Snapshot for a status update. The user is dropped when signed out.
    #[must_use]
    pub fn from_status(authenticated: bool, user: Option<UserProfile>) -> Self {
        Self { authenticated, user: user.filter(|_| authenticated) }
    }
}
