//! Password hashing and access tokens
//!
//! Pure functions only - no HTTP framework dependencies. Handlers map
//! the returned errors onto response statuses.
//!
//! Passwords are hashed with Argon2id and stored as PHC-format strings.
//! Access tokens are HS256-signed and expire after 24 hours; the claims
//! carry the user's identifier, email and role.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::models::{Role, User};
use crate::{Error, Result};

/// Access token lifetime
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier
    pub sub: Uuid,
    /// User email at issue time
    pub email: String,
    /// User role at issue time
    pub role: Role,
    /// Expiry (Unix epoch seconds)
    pub exp: i64,
}

/// Hash a password with a random salt; returns a PHC-format string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash.
///
/// `Ok(false)` on mismatch; `Err` only when the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid stored password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Issue a signed access token for a user, valid 24 hours
pub fn issue_token(secret: &str, user: &User) -> Result<String> {
    let exp = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp();
    issue_token_with_expiry(secret, user, exp)
}

/// Issue a token with an explicit expiry timestamp
pub fn issue_token_with_expiry(secret: &str, user: &User, exp: i64) -> Result<String> {
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

/// Verify a token's signature and expiry, returning its claims.
///
/// Malformed, tampered and expired tokens all fail the same way; the
/// caller cannot distinguish them (and must not leak which it was).
pub fn verify_token(secret: &str, token: &str) -> Result<Claims> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| Error::Forbidden("Invalid or expired token".to_string()))
}
