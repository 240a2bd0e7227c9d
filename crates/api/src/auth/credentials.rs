//! The single API principal allowed to log in.
//!
//! The password is hashed with Argon2id when configuration loads and only
//! the PHC string is kept, so login attempts are checked with the
//! verifier's constant-time comparison.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Username used when `API_USER` is unset.
const DEFAULT_USERNAME: &str = "user";

#[derive(Clone)]
pub struct ApiCredentials {
    pub username: String,
    password_hash: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl ApiCredentials {
    pub fn new(username: &str, password: &str) -> Result<Self, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string();
        Ok(Self {
            username: username.to_string(),
            password_hash,
        })
    }

    /// | Env Var        | Required | Default |
    /// |----------------|----------|---------|
    /// | `API_USER`     | no       | `user`  |
    /// | `API_PASSWORD` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `API_PASSWORD` is unset or empty.
    pub fn from_env() -> Self {
        let username = std::env::var("API_USER")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let password = std::env::var("API_PASSWORD").unwrap_or_default();
        assert!(!password.is_empty(), "API_PASSWORD must be set and non-empty");

        Self::new(&username, &password)
            .unwrap_or_else(|e| panic!("Failed to hash API_PASSWORD: {e}"))
    }

    /// Whether `username`/`password` name the configured principal.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, argon2::password_hash::Error> {
        let hash = PasswordHash::new(&self.password_hash)?;
        let password_ok = match Argon2::default().verify_password(password.as_bytes(), &hash) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => return Err(e),
        };
        Ok(password_ok && username == self.username)
    }
}
