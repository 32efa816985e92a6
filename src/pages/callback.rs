//! Redirect-mode OAuth callback (`/auth/callback?code=…`).
//!
//! Forwards the code from the query string to the session store once, then
//! replaces the history entry with home on success or login on failure.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::route_gate::join_full_path;
use crate::oauth::{CodeResponse, OAuthInitiator};
use crate::router::{Destination, HOME_PATH, LOGIN_PATH};

#[component]
pub fn CallbackPage() -> impl IntoView {
    let initiator = expect_context::<OAuthInitiator>();
    let location = use_location();
    let navigate = use_navigate();
    let status = RwSignal::new("Completing sign-in...".to_owned());

    let dest = Destination::parse(&join_full_path(
        &location.pathname.get_untracked(),
        &location.search.get_untracked(),
    ));
    let response = CodeResponse::from_query(&dest.query);

    leptos::task::spawn_local(async move {
        let replace = NavigateOptions { replace: true, ..NavigateOptions::default() };
        match initiator.complete(response).await {
            Ok(()) => navigate(HOME_PATH, replace),
            Err(e) => {
                status.set(e.to_string());
                navigate(LOGIN_PATH, replace);
            }
        }
    });

    view! {
        <div class="callback-page">
            <p data-testid="processing-message">{move || status.get()}</p>
        </div>
    }
}
