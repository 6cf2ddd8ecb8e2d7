use std::fmt;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::errors::{InternalError, TokenError};
use crate::types::internal::{Claims, TokenPurpose};

/// Default lifetime for confirmation, reset and email-change tokens.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Issues and verifies expiring, signed, purpose-tagged tokens used as
/// bearer capabilities for account operations. The token string is opaque
/// to everyone but this service.
pub struct TokenService {
    secret_key: String,
}

impl TokenService {
    pub fn new(secret_key: String) -> Self {
        Self { secret_key }
    }

    /// Mint a token for `user_id` restricted to `purpose`, expiring
    /// `ttl_seconds` from now. `new_email` is carried only by email-change
    /// tokens. Signing failure is a programmer error, not a runtime
    /// condition.
    pub fn issue(
        &self,
        user_id: i32,
        purpose: TokenPurpose,
        new_email: Option<String>,
        ttl_seconds: i64,
    ) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            purpose,
            new_email,
            iat: now,
            exp: now + ttl_seconds,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_key.as_bytes()),
        )
        .map_err(InternalError::TokenSigning)
    }

    /// Check signature and expiry and return the claims. Purpose and
    /// subject checks stay with the caller, which knows which flow it
    /// serves.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_key.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
