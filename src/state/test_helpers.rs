//! Scripted API double and fixtures shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use leptos::prelude::*;

use crate::net::api::AuthApi;
use crate::net::error::{ApiOp, AuthError};
use crate::net::types::{LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse, User};
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::state::storage::MemoryStorage;

/// A recorded call against [`MockApi`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Login(LoginRequest),
    Refresh(String),
    GetUser(String),
    Logout(String),
}

/// [`AuthApi`] that replays queued results and records every call.
///
/// An unscripted call fails with a 500 for that operation. When a session
/// signal is watched, the session state is snapshotted at every call.
#[derive(Default)]
pub struct MockApi {
    login: Mutex<VecDeque<Result<LoginResponse, AuthError>>>,
    refresh: Mutex<VecDeque<Result<RefreshTokenResponse, AuthError>>>,
    get_user: Mutex<VecDeque<Result<User, AuthError>>>,
    logout: Mutex<VecDeque<Result<(), AuthError>>>,
    calls: Mutex<Vec<Call>>,
    watched: Mutex<Option<RwSignal<AuthState>>>,
    states: Mutex<Vec<AuthState>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_login(&self, result: Result<LoginResponse, AuthError>) {
        self.login.lock().unwrap().push_back(result);
    }

    pub fn push_refresh(&self, result: Result<RefreshTokenResponse, AuthError>) {
        self.refresh.lock().unwrap().push_back(result);
    }

    pub fn push_get_user(&self, result: Result<User, AuthError>) {
        self.get_user.lock().unwrap().push_back(result);
    }

    pub fn push_logout(&self, result: Result<(), AuthError>) {
        self.logout.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Snapshot `state` whenever the API is called.
    pub fn watch(&self, state: RwSignal<AuthState>) {
        *self.watched.lock().unwrap() = Some(state);
    }

    /// Session state as seen from inside each call, in call order.
    pub fn states_seen(&self) -> Vec<AuthState> {
        self.states.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        let watched = *self.watched.lock().unwrap();
        if let Some(state) = watched {
            self.states.lock().unwrap().push(state.get_untracked());
        }
    }
}

fn next<T>(queue: &Mutex<VecDeque<Result<T, AuthError>>>, op: ApiOp) -> Result<T, AuthError> {
    queue.lock().unwrap().pop_front().unwrap_or_else(|| Err(AuthError::status(op, 500)))
}

#[async_trait::async_trait(?Send)]
impl AuthApi for MockApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        self.record(Call::Login(request.clone()));
        next(&self.login, ApiOp::Login)
    }

    async fn refresh_token(&self, request: &RefreshTokenRequest) -> Result<RefreshTokenResponse, AuthError> {
        self.record(Call::Refresh(request.refresh_token.clone()));
        next(&self.refresh, ApiOp::Refresh)
    }

    async fn get_user(&self, access_token: &str) -> Result<User, AuthError> {
        self.record(Call::GetUser(access_token.to_owned()));
        next(&self.get_user, ApiOp::GetUser)
    }

    async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        self.record(Call::Logout(access_token.to_owned()));
        next(&self.logout, ApiOp::Logout)
    }
}

pub fn user() -> User {
    User {
        id: "1".to_owned(),
        email: "alice@example.com".to_owned(),
        name: "Alice".to_owned(),
        picture: "https://example.com/alice.png".to_owned(),
    }
}

pub fn login_response(access: &str, refresh: &str) -> LoginResponse {
    LoginResponse {
        user: user(),
        access_token: access.to_owned(),
        refresh_token: refresh.to_owned(),
        expires_in: None,
    }
}

pub fn refresh_response(access: &str, refresh: &str) -> RefreshTokenResponse {
    RefreshTokenResponse { access_token: access.to_owned(), refresh_token: refresh.to_owned(), expires_in: None }
}

/// Build a store over a fresh mock API and the given storage.
pub fn store_with(storage: Arc<MemoryStorage>) -> (SessionStore, Arc<MockApi>) {
    let api = MockApi::new();
    let store = SessionStore::new(api.clone(), storage);
    api.watch(store.signal());
    (store, api)
}

/// Build a store that has already signed in with tokens `A` / `R`.
pub async fn signed_in_store() -> (SessionStore, Arc<MockApi>, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let (store, api) = store_with(storage.clone());
    api.push_login(Ok(login_response("A", "R")));
    store.login(&LoginRequest::new("code", "http://x/callback")).await.unwrap();
    (store, api, storage)
}
