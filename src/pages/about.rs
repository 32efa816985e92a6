//! Public about page.

use leptos::prelude::*;

use crate::config::AppConfig;

#[component]
pub fn AboutPage() -> impl IntoView {
    let config = use_context::<AppConfig>();
    let title = config.as_ref().map_or_else(|| env!("CARGO_PKG_NAME").to_owned(), |c| c.app_name.clone());
    let version = config.map_or_else(|| env!("CARGO_PKG_VERSION").to_owned(), |c| c.app_version);

    view! {
        <div class="about-page">
            <h1>{title}</h1>
            <p>"Google sign-in with persisted sessions and protected routes."</p>
            <p class="about-page__version">"Version " {version}</p>
        </div>
    }
}
