use super::*;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::net::error::ApiOp;
use crate::state::storage::{ACCESS_TOKEN_KEY, MemoryStorage, TokenStorage};
use crate::state::test_helpers::{Call, login_response, store_with};

const REDIRECT: &str = "http://x/callback";

// =========================================================================
// MockSource
// =========================================================================

struct MockSource {
    responses: Mutex<VecDeque<Result<CodeResponse, OAuthError>>>,
}

impl MockSource {
    fn new(response: Result<CodeResponse, OAuthError>) -> Arc<Self> {
        Arc::new(Self { responses: Mutex::new(VecDeque::from([response])) })
    }
}

#[async_trait::async_trait(?Send)]
impl CodeSource for MockSource {
    async fn request_code(&self) -> Result<CodeResponse, OAuthError> {
        self.responses.lock().unwrap().pop_front().unwrap_or(Err(OAuthError::Cancelled))
    }
}

fn code(value: &str) -> CodeResponse {
    CodeResponse { code: Some(value.to_owned()), ..CodeResponse::default() }
}

// =========================================================================
// CodeResponse
// =========================================================================

#[test]
fn into_code_returns_code() {
    assert_eq!(code("abc").into_code(), Ok("abc".to_owned()));
}

#[test]
fn into_code_error_wins_over_code() {
    let resp = CodeResponse {
        code: Some("abc".to_owned()),
        error: Some("access_denied".to_owned()),
        error_description: Some("user said no".to_owned()),
        state: None,
    };
    let err = resp.into_code().unwrap_err();
    assert_eq!(
        err,
        OAuthError::Provider { error: "access_denied".to_owned(), description: Some("user said no".to_owned()) }
    );
    assert_eq!(err.to_string(), "Google OAuth error: access_denied (user said no)");
}

#[test]
fn into_code_without_code_or_error_is_missing() {
    assert_eq!(CodeResponse::default().into_code(), Err(OAuthError::MissingCode));
    assert_eq!(code("").into_code(), Err(OAuthError::MissingCode));
}

#[test]
fn from_query_reads_callback_parameters() {
    let query = vec![
        ("code".to_owned(), "abc".to_owned()),
        ("state".to_owned(), "s1".to_owned()),
        ("scope".to_owned(), "email".to_owned()),
    ];
    let resp = CodeResponse::from_query(&query);
    assert_eq!(resp.code.as_deref(), Some("abc"));
    assert_eq!(resp.state.as_deref(), Some("s1"));
    assert_eq!(resp.error, None);
}

#[test]
fn provider_error_without_description() {
    let err = OAuthError::Provider { error: "popup_closed".to_owned(), description: None };
    assert_eq!(err.to_string(), "Google OAuth error: popup_closed");
}

// =========================================================================
// OAuthInitiator
// =========================================================================

#[tokio::test]
async fn sign_in_forwards_code_with_redirect_uri() {
    let storage = Arc::new(MemoryStorage::new());
    let (store, api) = store_with(storage.clone());
    api.push_login(Ok(login_response("A", "R")));
    let initiator = OAuthInitiator::new(MockSource::new(Ok(code("abc"))), store.clone(), REDIRECT);

    initiator.sign_in().await.unwrap();

    assert_eq!(api.calls(), vec![Call::Login(LoginRequest::new("abc", REDIRECT))]);
    assert!(store.is_authenticated());
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("A"));
}

#[tokio::test]
async fn sign_in_with_provider_error_does_not_login() {
    let (store, api) = store_with(Arc::new(MemoryStorage::new()));
    let resp = CodeResponse { error: Some("access_denied".to_owned()), ..CodeResponse::default() };
    let initiator = OAuthInitiator::new(MockSource::new(Ok(resp)), store.clone(), REDIRECT);

    let err = initiator.sign_in().await.unwrap_err();

    assert!(matches!(err, OAuthError::Provider { .. }));
    assert!(api.calls().is_empty());
    assert_eq!(store.state(), crate::state::auth::AuthState::default());
}

#[tokio::test]
async fn sign_in_without_sdk_does_nothing() {
    let (store, api) = store_with(Arc::new(MemoryStorage::new()));
    let initiator = OAuthInitiator::new(MockSource::new(Err(OAuthError::SdkUnavailable)), store.clone(), REDIRECT);

    assert_eq!(initiator.sign_in().await, Err(OAuthError::SdkUnavailable));
    assert!(api.calls().is_empty());
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn sign_in_surfaces_backend_rejection() {
    let (store, api) = store_with(Arc::new(MemoryStorage::new()));
    api.push_login(Err(AuthError::status(ApiOp::Login, 400)));
    let initiator = OAuthInitiator::new(MockSource::new(Ok(code("abc"))), store.clone(), REDIRECT);

    let err = initiator.sign_in().await.unwrap_err();

    assert_eq!(err, OAuthError::Login(AuthError::status(ApiOp::Login, 400)));
    assert_eq!(store.error().as_deref(), Some("Login failed: 400 Bad Request"));
}

#[tokio::test]
async fn complete_accepts_redirect_callback() {
    let (store, api) = store_with(Arc::new(MemoryStorage::new()));
    api.push_login(Ok(login_response("A", "R")));
    let initiator = OAuthInitiator::new(MockSource::new(Err(OAuthError::Cancelled)), store.clone(), REDIRECT);

    let query = vec![("code".to_owned(), "xyz".to_owned())];
    initiator.complete(CodeResponse::from_query(&query)).await.unwrap();

    assert_eq!(api.calls(), vec![Call::Login(LoginRequest::new("xyz", REDIRECT))]);
    assert!(initiator.session().is_authenticated());
}

#[tokio::test]
async fn google_client_outside_browser_reports_missing_sdk() {
    let client = google::GoogleCodeClient::new("client-id");
    assert_eq!(client.client_id(), "client-id");
    #[cfg(not(feature = "csr"))]
    assert_eq!(client.request_code().await, Err(OAuthError::SdkUnavailable));
}
