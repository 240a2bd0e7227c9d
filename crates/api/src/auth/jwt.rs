//! Bearer tokens for the `/api/v1` surface.
//!
//! Tokens are HS256-signed, carry the `taproom-api` issuer and the name of
//! the principal that logged in. [`JwtConfig::issue`] mints them at
//! `POST /api/v1/auth/login`; [`JwtConfig::verify`] checks them on every
//! other API route.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim stamped on, and required of, every token.
pub const ISSUER: &str = "taproom-api";

/// Default token lifetime in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Principal name the token was issued to.
    pub sub: String,
    pub iss: String,
    /// Expiry (UTC Unix seconds).
    pub exp: i64,
    /// Issued at (UTC Unix seconds).
    pub iat: i64,
    pub jti: String,
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `15`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset or empty, or the expiry is not a
    /// positive number of minutes.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let access_token_expiry_mins = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .ok()
            .map(|raw| {
                raw.parse::<i64>()
                    .ok()
                    .filter(|mins| *mins > 0)
                    .unwrap_or_else(|| {
                        panic!("JWT_ACCESS_EXPIRY_MINS must be a positive integer, got '{raw}'")
                    })
            })
            .unwrap_or(DEFAULT_ACCESS_EXPIRY_MINS);

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    /// Token lifetime in seconds, as reported to clients.
    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// Mint a token for `subject`.
    pub fn issue(&self, subject: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iss: ISSUER.to_string(),
            exp: iat + self.expires_in_secs(),
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Check signature, expiry and issuer, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_verifies_with_subject_and_lifetime() {
        let jwt = config("taproom-secret");
        let claims = jwt.verify(&jwt.issue("brewer").unwrap()).unwrap();

        assert_eq!(claims.sub, "brewer");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "brewer".into(),
            iss: ISSUER.into(),
            // Past the default 60-second leeway.
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        assert!(config("s").verify(&sign(&claims, "s")).is_err());
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "brewer".into(),
            iss: "someone-else".into(),
            exp: now + 300,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        assert!(config("s").verify(&sign(&claims, "s")).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = config("secret-alpha").issue("brewer").unwrap();
        assert!(config("secret-bravo").verify(&token).is_err());
    }
}
