//! Google OAuth initiator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Bridges the identity provider's code flow into a single authorization
//! code and hands it to [`SessionStore::login`]. The provider itself sits
//! behind [`CodeSource`]; `google` holds the browser SDK binding.
//!
//! ERROR HANDLING
//! ==============
//! SDK and provider errors are logged and returned without touching the
//! session. Only a code that reaches the backend can change session state.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod google;

use std::sync::Arc;

use crate::net::error::AuthError;
use crate::net::types::LoginRequest;
use crate::state::session::SessionStore;

/// Scopes requested from Google.
pub const GOOGLE_SCOPE: &str = "email profile openid";
/// Google code-client UX mode.
pub const GOOGLE_UX_MODE: &str = "popup";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OAuthError {
    /// The Google Identity Services script is not loaded.
    #[error("Google Identity Services SDK is not available")]
    SdkUnavailable,

    /// Google answered with an error instead of a code.
    #[error("Google OAuth error: {error}{}", describe(.description))]
    Provider { error: String, description: Option<String> },

    /// Google answered with neither a code nor an error.
    #[error("Google OAuth response did not include an authorization code")]
    MissingCode,

    /// The callback was dropped before it fired.
    #[error("Google OAuth flow was cancelled")]
    Cancelled,

    /// The backend rejected the code.
    #[error(transparent)]
    Login(#[from] AuthError),
}

fn describe(description: &Option<String>) -> String {
    description.as_deref().map(|d| format!(" ({d})")).unwrap_or_default()
}

/// The provider's answer to a code request, popup or redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeResponse {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub state: Option<String>,
}

impl CodeResponse {
    /// Build from redirect-mode callback query pairs.
    #[must_use]
    pub fn from_query(query: &[(String, String)]) -> Self {
        let get = |key: &str| query.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone());
        Self {
            code: get("code"),
            error: get("error"),
            error_description: get("error_description"),
            state: get("state"),
        }
    }

    /// Extract the authorization code. An `error` field wins over a code.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Provider`] or [`OAuthError::MissingCode`].
    pub fn into_code(self) -> Result<String, OAuthError> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return Err(OAuthError::Provider { error, description: self.error_description });
        }
        self.code.filter(|c| !c.is_empty()).ok_or(OAuthError::MissingCode)
    }
}

/// Source of authorization codes. Enables mocking in tests.
#[async_trait::async_trait(?Send)]
pub trait CodeSource: Send + Sync {
    /// Run the provider flow once and report its answer.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError`] when the flow cannot be started or never completes.
    async fn request_code(&self) -> Result<CodeResponse, OAuthError>;
}

/// Starts sign-in and forwards the resulting code to the session store.
#[derive(Clone)]
pub struct OAuthInitiator {
    source: Arc<dyn CodeSource>,
    session: SessionStore,
    redirect_uri: String,
}

impl OAuthInitiator {
    pub fn new(source: Arc<dyn CodeSource>, session: SessionStore, redirect_uri: impl Into<String>) -> Self {
        Self { source, session, redirect_uri: redirect_uri.into() }
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Run the popup flow and log in with the resulting code.
    ///
    /// # Errors
    ///
    /// Returns the SDK, provider, or login failure. Each is logged.
    pub async fn sign_in(&self) -> Result<(), OAuthError> {
        let response = self.source.request_code().await.inspect_err(|e| log::error!("google sign-in: {e}"))?;
        self.complete(response).await
    }

    /// Log in with a provider answer obtained elsewhere (redirect callback).
    ///
    /// # Errors
    ///
    /// Returns the provider or login failure. Each is logged.
    pub async fn complete(&self, response: CodeResponse) -> Result<(), OAuthError> {
        let code = response.into_code().inspect_err(|e| log::error!("google sign-in: {e}"))?;
        let request = LoginRequest::new(code, self.redirect_uri.clone());
        self.session.login(&request).await?;
        Ok(())
    }
}
