use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::SecurityConfig;

pub const ADMIN_SUBJECT: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn admin(expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: ADMIN_SUBJECT.to_string(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Authorization header must use Bearer token format")]
    MalformedHeader,

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Lowercase hex SHA-256 digest, the format expected in ADMIN_PASSWORD_HASH
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Compare a submitted password against the configured digest
pub fn verify_admin_password(security: &SecurityConfig, password: &str) -> Result<(), AuthError> {
    if security.admin_password_hash.is_empty() {
        return Err(AuthError::NotConfigured("ADMIN_PASSWORD_HASH"));
    }

    let candidate = hash_password(password);
    if constant_time_eq(candidate.as_bytes(), security.admin_password_hash.as_bytes()) {
        Ok(())
    } else {
        Err(AuthError::InvalidPassword)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub fn generate_jwt(security: &SecurityConfig, claims: &Claims) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::NotConfigured("JWT_SECRET"));
    }

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Validate a token and require the admin subject
pub fn validate_jwt(security: &SecurityConfig, token: &str) -> Result<Claims, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::NotConfigured("JWT_SECRET"));
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default()).map_err(|e| {
        tracing::debug!("Rejected admin token: {}", e);
        AuthError::InvalidToken
    })?;

    if token_data.claims.sub != ADMIN_SUBJECT {
        return Err(AuthError::InvalidToken);
    }
    Ok(token_data.claims)
}
