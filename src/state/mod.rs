//! Client-side session state.
//!
//! DESIGN
//! ======
//! `auth` is the plain state record, `storage` the persistence seam, and
//! `session` the store that keeps the two in step.

pub mod auth;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_helpers;
