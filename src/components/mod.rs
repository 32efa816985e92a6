//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session from Leptos context (`SessionStore`,
//! `RwSignal<AuthState>`, `RouteGuard`) provided by `app::App`.

pub mod route_gate;
pub mod user_profile;
