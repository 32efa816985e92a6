//! Card showing the signed-in user.

#[cfg(test)]
#[path = "user_profile_test.rs"]
mod user_profile_test;

use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Display name for the profile card, falling back to the email address.
pub(crate) fn display_name(state: &AuthState) -> String {
    state.user.as_ref().map_or_else(
        || "Guest".to_owned(),
        |u| if u.name.trim().is_empty() { u.email.clone() } else { u.name.clone() },
    )
}

#[component]
pub fn UserProfile(auth: RwSignal<AuthState>) -> impl IntoView {
    let name = move || auth.with(display_name);
    let email = move || auth.with(|s| s.user.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let picture = move || auth.with(|s| s.user.as_ref().map(|u| u.picture.clone()).filter(|p| !p.is_empty()));

    view! {
        <div class="user-profile" data-testid="user-profile">
            {move || picture().map(|src| view! { <img class="user-profile__avatar" src=src alt="avatar"/> })}
            <div class="user-profile__text">
                <span class="user-profile__name">{name}</span>
                <span class="user-profile__email">{email}</span>
            </div>
        </div>
    }
}
