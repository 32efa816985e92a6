//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` is handed an already-wired `SessionStore` and `OAuthInitiator` and
//! publishes them through Leptos context. Every route view is wrapped in
//! `RouteGate`, so the guard runs on each navigation including the first.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_gate::RouteGate;
use crate::config::AppConfig;
use crate::net::api::HttpAuthApi;
use crate::oauth::OAuthInitiator;
use crate::oauth::google::GoogleCodeClient;
use crate::pages::{about::AboutPage, callback::CallbackPage, home::HomePage, login::LoginPage};
use crate::router::RouteGuard;
use crate::state::session::SessionStore;
use crate::state::storage::LocalStorage;

/// Root application component.
#[component]
pub fn App(config: AppConfig, session: SessionStore, initiator: OAuthInitiator) -> impl IntoView {
    provide_meta_context();

    let title = config.app_name.clone();
    provide_context(session.signal());
    provide_context(RouteGuard::new(session.clone()));
    provide_context(session);
    provide_context(initiator);
    provide_context(config);

    view! {
        <Title text=title/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <RouteGate><HomePage/></RouteGate> }/>
                <Route path=StaticSegment("login") view=|| view! { <RouteGate><LoginPage/></RouteGate> }/>
                <Route
                    path=(StaticSegment("auth"), StaticSegment("callback"))
                    view=|| view! { <RouteGate><CallbackPage/></RouteGate> }
                />
                <Route path=StaticSegment("about") view=|| view! { <RouteGate><AboutPage/></RouteGate> }/>
            </Routes>
        </Router>
    }
}

/// Wire the browser services for `config` at `origin`.
///
/// # Errors
///
/// Returns the HTTP client construction failure.
pub fn build_services(
    config: &AppConfig,
    origin: &str,
) -> Result<(SessionStore, OAuthInitiator), crate::net::error::AuthError> {
    let api = HttpAuthApi::new(&config.resolved_api_base_url(origin))?;
    log::info!("auth api at {}", api.base_url());
    let session = SessionStore::new(Arc::new(api), Arc::new(LocalStorage));
    let initiator = OAuthInitiator::new(
        Arc::new(GoogleCodeClient::new(config.google_client_id.clone())),
        session.clone(),
        config.redirect_uri(origin),
    );
    Ok((session, initiator))
}

/// Browser entry: install logging, load config, mount `App` on `<body>`.
#[cfg(feature = "csr")]
pub fn mount() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let config = match AppConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("config: {e}");
            return;
        }
    };
    let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) else {
        log::error!("mount: window origin unavailable");
        return;
    };
    let (session, initiator) = match build_services(&config, &origin) {
        Ok(services) => services,
        Err(e) => {
            log::error!("mount: {e}");
            return;
        }
    };

    log::info!("{} {} starting", config.app_name, config.app_version);
    leptos::mount::mount_to_body(move || view! { <App config=config session=session initiator=initiator/> });
}
