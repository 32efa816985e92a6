//! Networking modules for the auth backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the four REST calls, `error` defines their failure taxonomy,
//! and `types` defines the JSON wire schema.

pub mod api;
pub mod error;
pub mod types;
