use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to initialize logging: {0}")]
    Initialization(String),
}

/// Initialize the tracing subscriber. The filter comes from `RUST_LOG`,
/// defaulting to `info`.
pub fn init_logging() -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Initialization(e.to_string()))
}
