//! Login page with the Google sign-in button.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::oauth::{OAuthError, OAuthInitiator};
use crate::router::{REDIRECT_PARAM, safe_redirect_target};
use crate::state::auth::AuthState;

/// Message for a sign-in attempt that failed before or outside the backend
/// call. Backend failures already surface through `AuthState::error`.
pub(crate) fn sign_in_failure_message(err: &OAuthError) -> Option<String> {
    match err {
        OAuthError::Login(_) => None,
        OAuthError::Cancelled => Some("Sign-in was cancelled.".to_owned()),
        other => Some(other.to_string()),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let initiator = expect_context::<OAuthInitiator>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let query = use_query_map();
    let navigate = use_navigate();
    let info = RwSignal::new(None::<String>);

    let on_sign_in = move |_| {
        if auth.with_untracked(|s| s.is_loading) {
            return;
        }
        info.set(None);
        let target = safe_redirect_target(query.with_untracked(|q| q.get(REDIRECT_PARAM)).as_deref());
        let initiator = initiator.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match initiator.sign_in().await {
                Ok(()) => navigate(&target, NavigateOptions::default()),
                Err(e) => info.set(sign_in_failure_message(&e)),
            }
        });
    };

    let message = move || info.get().or_else(|| auth.with(|s| s.error.clone()));

    view! {
        <div class="login-page">
            <div class="login-card" data-testid="login-form">
                <h1>"Sign in"</h1>
                <p class="login-card__subtitle">"Use your Google account to continue."</p>
                <button
                    class="login-button"
                    type="button"
                    on:click=on_sign_in
                    disabled=move || auth.with(|s| s.is_loading)
                >
                    {move || if auth.with(|s| s.is_loading) { "Signing in..." } else { "Sign in with Google" }}
                </button>
                <Show when=move || message().is_some()>
                    <p class="login-message" data-testid="login-error">{move || message().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
