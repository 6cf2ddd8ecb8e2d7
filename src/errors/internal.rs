use sea_orm::DbErr;
use thiserror::Error;

/// Infrastructure and configuration failures. Token rejection is not an
/// error (see [`crate::errors::TokenError`] and the store contracts):
/// anything surfaced here is something the caller cannot fix by retrying
/// with a different token.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("database failure during {operation}")]
    Database {
        operation: &'static str,
        #[source]
        source: DbErr,
    },

    /// Duplicate email/username/scenario name. The presentation layer is
    /// expected to pre-check; the unique constraint re-validates at commit.
    #[error("unique constraint violated on {entity}")]
    Uniqueness { entity: &'static str },

    /// No role is flagged default. Roles must be seeded before users can
    /// be created.
    #[error("no default role is seeded")]
    MissingDefaultRole,

    #[error("password hashing failure: {0}")]
    PasswordHash(String),

    #[error("token signing failure")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),
}

impl InternalError {
    pub fn db(operation: &'static str, source: DbErr) -> Self {
        Self::Database { operation, source }
    }

    /// Classify an insert failure: unique-constraint violations become
    /// [`InternalError::Uniqueness`], everything else stays a database error.
    pub fn from_insert(entity: &'static str, operation: &'static str, source: DbErr) -> Self {
        if source.to_string().contains("UNIQUE") {
            Self::Uniqueness { entity }
        } else {
            Self::Database { operation, source }
        }
    }
}
