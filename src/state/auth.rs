//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Held in an `RwSignal` owned by the session store. Route guards and
//! user-aware components read it; only `SessionStore` writes it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the user, tokens, and request status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// `true` when both a non-empty access token and a user are held.
    ///
    /// Derived on read; never stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.has_access_token() && self.user.is_some()
    }

    /// `true` when a non-empty access token is held.
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// `true` when a non-empty refresh token is held.
    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Drop the user and both tokens. Leaves `error` and `is_loading` alone.
    pub fn clear_session(&mut self) {
        self.user = None;
        self.access_token = None;
        self.refresh_token = None;
    }
}
