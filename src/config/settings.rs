use std::env;
use std::fmt;

use thiserror::Error;

/// Minimum length for the token-signing secret.
const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("required environment variable '{0}' is missing")]
    MissingVar(&'static str),

    #[error("secret key must be at least {expected} characters, got {actual}")]
    SecretTooShort { expected: usize, actual: usize },
}

/// Externally supplied configuration, passed explicitly into the services
/// and stores that need it. Nothing in the core reads ambient global state.
#[derive(Clone)]
pub struct Settings {
    /// Process-wide secret for signing capability tokens.
    pub secret_key: String,
    /// Users registering with this email get the administrator role.
    pub admin_email: String,
    pub database_url: String,
}

impl Settings {
    pub fn new(
        secret_key: impl Into<String>,
        admin_email: impl Into<String>,
        database_url: impl Into<String>,
    ) -> Result<Self, SettingsError> {
        let secret_key = secret_key.into();
        if secret_key.len() < MIN_SECRET_LEN {
            return Err(SettingsError::SecretTooShort {
                expected: MIN_SECRET_LEN,
                actual: secret_key.len(),
            });
        }
        Ok(Self {
            secret_key,
            admin_email: admin_email.into(),
            database_url: database_url.into(),
        })
    }

    /// Load from `SECRET_KEY`, `CASEMGR_ADMIN` and `DATABASE_URL`.
    /// `DATABASE_URL` falls back to a local SQLite file.
    pub fn from_env() -> Result<Self, SettingsError> {
        let secret_key =
            env::var("SECRET_KEY").map_err(|_| SettingsError::MissingVar("SECRET_KEY"))?;
        let admin_email =
            env::var("CASEMGR_ADMIN").map_err(|_| SettingsError::MissingVar("CASEMGR_ADMIN"))?;
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://casemgr.db?mode=rwc".to_string());
        Self::new(secret_key, admin_email, database_url)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("secret_key", &"<redacted>")
            .field("admin_email", &self.admin_email)
            .field("database_url", &self.database_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_long_enough_secret() {
        let settings = Settings::new(
            "0123456789abcdef0123456789abcdef",
            "admin@example.com",
            "sqlite::memory:",
        );
        assert!(settings.is_ok());
    }

    #[test]
    fn rejects_a_short_secret() {
        let err = Settings::new("short", "admin@example.com", "sqlite::memory:").unwrap_err();
        match err {
            SettingsError::SecretTooShort { actual, .. } => assert_eq!(actual, 5),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let settings = Settings::new(
            "0123456789abcdef0123456789abcdef",
            "admin@example.com",
            "sqlite::memory:",
        )
        .unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("0123456789abcdef"));
        assert!(debug.contains("<redacted>"));
    }
}
