//! Session store: the only writer of [`AuthState`].
//!
//! DESIGN
//! ======
//! The store is a cheap `Clone` handle (two `Arc`s and a `Copy` signal)
//! provided through Leptos context by the app root, so tests build isolated
//! instances instead of touching a global. State is updated in short
//! closures and never borrowed across an `.await`, which keeps every
//! operation atomic from the point of view of other tasks on the event loop.
//!
//! Every exit path, including errors, leaves the state with
//! `is_authenticated()` consistent with the tokens and user it holds, and
//! the persisted tokens mirror the in-memory ones.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::*;

use super::auth::AuthState;
use super::storage::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStorage};
use crate::net::api::AuthApi;
use crate::net::error::AuthError;
use crate::net::types::{LoginRequest, RefreshTokenRequest, User};

/// Orchestrates the login / logout / initialize / refresh lifecycle.
#[derive(Clone)]
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn TokenStorage>,
    state: RwSignal<AuthState>,
}

impl SessionStore {
    /// Create a store with an empty session.
    pub fn new(api: Arc<dyn AuthApi>, storage: Arc<dyn TokenStorage>) -> Self {
        Self { api, storage, state: RwSignal::new(AuthState::default()) }
    }

    /// Reactive handle for components. Writes must go through the store.
    #[must_use]
    pub fn signal(&self) -> RwSignal<AuthState> {
        self.state
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.get_untracked()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.with_untracked(AuthState::is_authenticated)
    }

    #[must_use]
    pub fn has_access_token(&self) -> bool {
        self.state.with_untracked(AuthState::has_access_token)
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.with_untracked(|s| s.user.clone())
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.access_token.clone())
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.refresh_token.clone())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.with_untracked(|s| s.is_loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.with_untracked(|s| s.error.clone())
    }

    /// Exchange an authorization code for a session.
    ///
    /// On failure the message is also recorded in `AuthState::error` and the
    /// session (memory and storage) is cleared.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] reported by the API client.
    pub async fn login(&self, request: &LoginRequest) -> Result<(), AuthError> {
        self.state.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.api.login(request).await {
            Ok(resp) => {
                self.persist_tokens(&resp.access_token, &resp.refresh_token);
                log::info!("signed in as {}", resp.user.email);
                self.state.update(|s| {
                    s.user = Some(resp.user);
                    s.access_token = Some(resp.access_token);
                    s.refresh_token = Some(resp.refresh_token);
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(err) => {
                log::warn!("login failed: {err}");
                self.clear_persisted();
                let message = err.to_string();
                self.state.update(|s| {
                    s.clear_session();
                    s.error = Some(message);
                    s.is_loading = false;
                });
                Err(err)
            }
        }
    }

    /// End the session.
    ///
    /// The backend is told first when an access token is held; its failure
    /// is logged and ignored. Local state and storage are always cleared.
    pub async fn logout(&self) {
        let token = self.state.with_untracked(|s| s.access_token.clone()).filter(|t| !t.is_empty());
        if let Some(token) = token {
            if let Err(err) = self.api.logout(&token).await {
                log::error!("logout error: {err}");
            }
        }

        self.clear_persisted();
        self.state.update(|s| {
            s.clear_session();
            s.error = None;
        });
    }

    /// Restore a session from persisted tokens.
    ///
    /// A stored access token is validated by fetching the current user. A
    /// rejected token is dropped from memory and storage without surfacing an
    /// error.
    pub async fn initialize_auth(&self) {
        self.state.update(|s| s.is_loading = true);

        let access_token = self.storage.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty());
        let refresh_token = self.storage.get(REFRESH_TOKEN_KEY);

        if let Some(access_token) = access_token {
            match self.api.get_user(&access_token).await {
                Ok(user) => {
                    log::debug!("restored session for {}", user.email);
                    self.state.update(|s| {
                        s.user = Some(user);
                        s.access_token = Some(access_token);
                        s.refresh_token = refresh_token;
                    });
                }
                Err(err) => {
                    log::error!("error initializing auth: {err}");
                    self.clear_persisted();
                    self.state.update(AuthState::clear_session);
                }
            }
        }

        self.state.update(|s| s.is_loading = false);
    }

    /// Rotate the token pair using the held refresh token.
    ///
    /// Any failure, including a missing refresh token, records the message in
    /// `AuthState::error` and then ends the session with a full
    /// [`SessionStore::logout`], which clears it again. The returned error
    /// carries the reason.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingRefreshToken`] or the API client's error.
    pub async fn refresh_auth_token(&self) -> Result<(), AuthError> {
        let result = self.rotate_tokens().await;
        if let Err(err) = &result {
            log::warn!("token refresh failed: {err}");
            let message = err.to_string();
            self.state.update(|s| s.error = Some(message));
            self.logout().await;
        }
        result
    }

    async fn rotate_tokens(&self) -> Result<(), AuthError> {
        let refresh_token = self
            .state
            .with_untracked(|s| s.refresh_token.clone())
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;

        let resp = self.api.refresh_token(&RefreshTokenRequest { refresh_token }).await?;

        self.persist_tokens(&resp.access_token, &resp.refresh_token);
        self.state.update(|s| {
            s.access_token = Some(resp.access_token);
            s.refresh_token = Some(resp.refresh_token);
        });
        Ok(())
    }

    fn persist_tokens(&self, access_token: &str, refresh_token: &str) {
        self.storage.set(ACCESS_TOKEN_KEY, access_token);
        self.storage.set(REFRESH_TOKEN_KEY, refresh_token);
    }

    fn clear_persisted(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
    }
}
