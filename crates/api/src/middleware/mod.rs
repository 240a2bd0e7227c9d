//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`auth::RequireAuth`] -- Requires any authenticated caller.

pub mod auth;
