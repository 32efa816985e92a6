//! # google-auth-client
//!
//! Leptos + WASM single-page client for Google sign-in. It keeps a backend
//! session (access and refresh tokens) in a reactive store, persists tokens
//! across reloads, and guards routes that need an authenticated user.
//!
//! The session lifecycle (`state`), the auth API client (`net`), the OAuth
//! bridge (`oauth`) and the guard decision (`router`) are plain Rust and are
//! tested natively. Pages and components are thin Leptos glue, and the
//! browser entry point is behind the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod oauth;
pub mod pages;
pub mod router;
pub mod state;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    app::mount();
}
