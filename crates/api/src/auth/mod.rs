//! Authentication primitives.
//!
//! - [`credentials`] -- the configured API principal (Argon2id-hashed).
//! - [`jwt`] -- HS256 token issuance and verification.

pub mod credentials;
pub mod jwt;
