//! Route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages are thin: they read the session from context, start session or
//! OAuth operations, and navigate on the result. Access control lives in
//! `components::route_gate`, never in a page.

pub mod about;
pub mod callback;
pub mod home;
pub mod login;
