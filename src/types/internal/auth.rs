use serde::{Deserialize, Serialize};

/// Discriminator baked into every token so a token minted for one flow
/// cannot be replayed against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Account confirmation after registration.
    Confirm,
    /// Password reset.
    Reset,
    /// Email address change.
    ChangeEmail,
    /// Generic bearer authentication.
    Auth,
}

/// Signed token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id).
    pub sub: i32,

    /// What the token authorizes.
    pub purpose: TokenPurpose,

    /// Target address, present only on email-change tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}
