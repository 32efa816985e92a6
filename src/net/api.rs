//! REST client for the auth backend.
//!
//! `AuthApi` is the seam the session store talks to; `HttpAuthApi` is the
//! reqwest implementation. On `wasm32` reqwest runs on top of browser
//! `fetch`, so the same code serves the app and the native tests.
//!
//! ERROR HANDLING
//! ==============
//! Every failure maps to an [`AuthError`] tagged with its [`ApiOp`]. There
//! are no retries: a non-2xx answer goes straight back to the caller.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use super::error::{ApiOp, AuthError};
use super::types::{LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse, User};

const LOGIN_PATH: &str = "/auth/google/login";
const REFRESH_PATH: &str = "/auth/refresh";
const ME_PATH: &str = "/auth/me";
const LOGOUT_PATH: &str = "/auth/logout";

/// Backend operations the session store depends on. Enables mocking in tests.
///
/// Futures are `?Send`: in the browser they wrap JS promises.
#[async_trait::async_trait(?Send)]
pub trait AuthApi: Send + Sync {
    /// Exchange an authorization code for a user and token pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError>;

    /// Trade a refresh token for a fresh token pair.
    ///
    /// # Errors
    ///
    /// Same conditions as [`AuthApi::login`].
    async fn refresh_token(&self, request: &RefreshTokenRequest) -> Result<RefreshTokenResponse, AuthError>;

    /// Fetch the user owning `access_token`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`AuthApi::login`].
    async fn get_user(&self, access_token: &str) -> Result<User, AuthError>;

    /// Invalidate the session server-side.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] on transport failure or non-2xx status.
    async fn logout(&self, access_token: &str) -> Result<(), AuthError>;
}

/// reqwest-backed [`AuthApi`] rooted at a configured base URL.
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Build a client for `base_url` (e.g. `https://app.example.com/api`).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::HttpClientBuild`] if reqwest cannot build its client.
    pub fn new(base_url: &str) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: normalize_base_url(base_url) })
    }

    /// The normalized base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let op = ApiOp::Login;
        let resp = self
            .http
            .post(self.endpoint(LOGIN_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| transport(op, &e))?;
        decode(op, resp).await
    }

    async fn refresh_token(&self, request: &RefreshTokenRequest) -> Result<RefreshTokenResponse, AuthError> {
        let op = ApiOp::Refresh;
        let resp = self
            .http
            .post(self.endpoint(REFRESH_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| transport(op, &e))?;
        decode(op, resp).await
    }

    async fn get_user(&self, access_token: &str) -> Result<User, AuthError> {
        let op = ApiOp::GetUser;
        let resp = self
            .http
            .get(self.endpoint(ME_PATH))
            .bearer_auth(access_token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| transport(op, &e))?;
        decode(op, resp).await
    }

    async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let op = ApiOp::Logout;
        let resp = self
            .http
            .post(self.endpoint(LOGOUT_PATH))
            .bearer_auth(access_token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| transport(op, &e))?;
        ensure_success(op, &resp)
    }
}

fn transport(op: ApiOp, err: &reqwest::Error) -> AuthError {
    AuthError::Transport { op, message: err.to_string() }
}

fn ensure_success(op: ApiOp, resp: &reqwest::Response) -> Result<(), AuthError> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(AuthError::status(op, status.as_u16()))
    }
}

async fn decode<T: DeserializeOwned>(op: ApiOp, resp: reqwest::Response) -> Result<T, AuthError> {
    ensure_success(op, &resp)?;
    let body = resp.text().await.map_err(|e| transport(op, &e))?;
    serde_json::from_str(&body).map_err(|e| AuthError::Decode { op, message: e.to_string() })
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_owned()
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}
