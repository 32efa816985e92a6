//! Errors produced by auth API calls and session operations.
//!
//! The `Display` output of [`AuthError`] is what ends up in
//! `AuthState::error`, so the messages are user-facing.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

/// The four backend operations, used to prefix failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOp {
    Login,
    Refresh,
    GetUser,
    Logout,
}

impl fmt::Display for ApiOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Login => "Login",
            Self::Refresh => "Token refresh",
            Self::GetUser => "Get user",
            Self::Logout => "Logout",
        })
    }
}

/// Errors produced by the auth API client and the session store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend answered with a non-2xx status.
    #[error("{op} failed: {status} {status_text}")]
    Status { op: ApiOp, status: u16, status_text: String },

    /// The request never produced a response (DNS, CORS, connection reset).
    #[error("{op} failed: {message}")]
    Transport { op: ApiOp, message: String },

    /// The response body could not be decoded.
    #[error("{op} failed: invalid response body: {message}")]
    Decode { op: ApiOp, message: String },

    /// A refresh was requested while no refresh token is held.
    #[error("No refresh token available")]
    MissingRefreshToken,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl AuthError {
    /// Build a [`AuthError::Status`] from a raw status code, using the
    /// canonical reason phrase as the status text.
    #[must_use]
    pub fn status(op: ApiOp, status: u16) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_owned();
        Self::Status { op, status, status_text }
    }
}
