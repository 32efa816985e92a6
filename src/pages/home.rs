//! Authenticated landing page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::user_profile::UserProfile;
use crate::router::LOGIN_PATH;
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let logout_session = session.clone();
    let on_logout = move |_| {
        let session = logout_session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            session.logout().await;
            navigate(LOGIN_PATH, NavigateOptions::default());
        });
    };

    let on_refresh = move |_| {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            // Failure already forced a logout; the guard takes it from here.
            let _ = session.refresh_auth_token().await;
        });
    };

    view! {
        <div class="home-page">
            <h1>"Welcome"</h1>
            <UserProfile auth=auth/>
            <div class="home-page__actions">
                <button class="home-button" type="button" on:click=on_refresh disabled=move || auth.with(|s| s.is_loading)>
                    "Refresh session"
                </button>
                <button class="home-button home-button--logout" type="button" on:click=on_logout data-testid="logout-button">
                    "Sign out"
                </button>
            </div>
            <Show when=move || auth.with(|s| s.error.is_some())>
                <p class="home-page__error">{move || auth.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
        </div>
    }
}
