use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use tracing::{debug, instrument};

use super::types::TokenClaims;
use crate::user::models::UserModel;

/// Verification outcomes for a presented token, distinct from store-level
/// failures. `Signing` is the issuance-side counterpart and is not expected
/// in healthy operation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Stateless token issuer and verifier. Owns the signing secret and the
/// expiry policy; performs no I/O.
#[derive(Clone)]
pub struct Authenticator {
    secret: String,
    pub expiration_hours: i64,
}

impl Authenticator {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// Reads the signing secret and expiry policy from the environment.
    /// Called once at startup; the resulting value is injected everywhere
    /// else.
    pub fn from_env() -> Self {
        let expiration_hours = std::env::var("GAMELOG_TOKEN_EXPIRATION_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(72);

        Self {
            secret: std::env::var("GAMELOG_TOKEN_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            expiration_hours,
        }
    }

    /// Creates a signed, time-bounded token for the given user
    #[instrument(skip(self, user))]
    pub fn new_token_for_user(&self, user: &UserModel) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = (now + Duration::hours(self.expiration_hours)).timestamp() as usize;

        debug!(
            user_id = %user.id,
            expiration_hours = self.expiration_hours,
            exp_timestamp = exp,
            "Issuing token"
        );

        let claims = TokenClaims {
            sub: user.id.clone(),
            username: user.username.clone(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode token");
            TokenError::Signing(e.to_string())
        })
    }

    /// Verifies signature and expiry without any external I/O and returns
    /// the embedded claims. The claims identify which user the token was
    /// issued for, as a fast-path hint; the token association in the store
    /// remains the final authority.
    #[instrument(skip(self, token))]
    pub fn decode_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::default();
        // Reject at the embedded expiry, not some leeway window after it
        validation.leeway = 0;

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "Token verification failed");
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            }
        })
    }
}
