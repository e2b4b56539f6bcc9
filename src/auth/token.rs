//! Signed, expiring identity tokens.
//!
//! Tokens are HS256 JWTs over a process-wide secret. Verification pins the
//! algorithm list, so a token signed under any other scheme (or another key)
//! is rejected outright, and runs with zero leeway so expiry is exact.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::config;

use super::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Storage id of the user.
    pub id: String,
    pub email: String,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(id: String, email: String, is_admin: bool) -> Self {
        let now = Utc::now();
        let ttl_days = config().security.token_ttl_days;
        Self {
            id,
            email,
            is_admin,
            exp: (now + Duration::days(ttl_days)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn issue(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|_| AuthError::TokenInvalid)
}

pub fn verify(token: &str) -> Result<Claims, AuthError> {
    let secret = &config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is exact: a token one second past `exp` is already dead
    validation.leeway = 0;

    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(err) => match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
            _ => Err(AuthError::TokenInvalid),
        },
    }
}
