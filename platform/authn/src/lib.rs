//! Platform authentication helpers.
//!
//! Passwords are stored as Argon2 PHC strings; sessions are stateless HS256
//! bearer tokens carrying the user id and name.

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("access denied")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("password hashing failed")]
    Hashing(#[source] password_hash::Error),
    #[error("token lifetime of {0} minutes is out of range")]
    InvalidTtl(i64),
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        }
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.jwt_secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.jwt_secret.as_bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(AuthError::Hashing)
}

/// `Ok(false)` on mismatch; a stored hash that does not parse is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(AuthError::Hashing)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(AuthError::Hashing(err)),
    }
}

pub fn issue_token(user_id: i32, username: &str, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now();
    let ttl = config.token_ttl_minutes;
    let exp = Duration::try_minutes(ttl)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(AuthError::InvalidTtl(ttl))?;
    let claims = Claims {
        user_id,
        username: username.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };
    jsonwebtoken::encode(&Header::default(), &claims, &config.encoding_key())
        .map_err(AuthError::Signing)
}

pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::default();
    validation.leeway = 0;
    jsonwebtoken::decode::<Claims>(token, &config.decoding_key(), &validation)
        .map(|data| data.claims)
        .map_err(AuthError::InvalidToken)
}

/// Extracts the credential from an `Authorization: Bearer <token>` value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
