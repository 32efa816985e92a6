//! Navigation guard wrapper for route views.
//!
//! Runs [`RouteGuard::before_each`] whenever the location changes and only
//! renders its children once the guard allows the navigation. Redirects
//! replace the history entry so the back button never lands on a page the
//! guard would bounce again.

#[cfg(test)]
#[path = "route_gate_test.rs"]
mod route_gate_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::router::{GuardDecision, RouteGuard};

/// Join a router pathname and search string into a full path.
/// `search` may or may not carry its leading `?`.
pub(crate) fn join_full_path(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

#[component]
pub fn RouteGate(children: ChildrenFn) -> impl IntoView {
    let guard = expect_context::<RouteGuard>();
    let location = use_location();
    let navigate = use_navigate();
    let allowed = RwSignal::new(false);
    let pending = RwSignal::new(String::new());

    Effect::new(move || {
        let full_path = join_full_path(&location.pathname.get(), &location.search.get());
        allowed.set(false);
        pending.set(full_path.clone());

        let guard = guard.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let decision = guard.before_each(&full_path).await;
            // A newer navigation superseded this one.
            if pending.get_untracked() != full_path {
                return;
            }
            match decision {
                GuardDecision::Allow => allowed.set(true),
                GuardDecision::Redirect(to) => {
                    navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
            }
        });
    });

    view! {
        <Show
            when=move || allowed.get()
            fallback=|| view! { <p class="route-gate__pending">"Loading..."</p> }
        >
            {children()}
        </Show>
    }
}
