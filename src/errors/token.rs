use thiserror::Error;

/// Why a token was rejected. Callers collapse both variants into a single
/// "rejected" outcome; the distinction exists for logging only and is never
/// reported to the presenter of the token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,
}
