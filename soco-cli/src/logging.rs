//! Logging setup for the command-line front end
//!
//! Diagnostics go to stderr so command output on stdout stays clean for
//! scripts and `--json` consumers.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Environment variable that overrides `--log-level`
pub const LOG_LEVEL_ENV: &str = "SOCO_LOG_LEVEL";

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid log filter '{0}'")]
    InvalidFilter(String),
}

/// Install the stderr subscriber
///
/// `SOCO_LOG_LEVEL` wins over `default_level`, which usually comes from
/// `--log-level`.
pub fn init_logging(default_level: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    let filter = create_env_filter(env_level.as_deref(), default_level)?;

    Registry::default()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::TracingInit(e.to_string()))
}

fn create_env_filter(env_level: Option<&str>, default_level: &str) -> Result<EnvFilter, LoggingError> {
    let directive = env_level
        .filter(|level| !level.trim().is_empty())
        .unwrap_or(default_level);

    EnvFilter::try_new(directive).map_err(|_| LoggingError::InvalidFilter(directive.to_string()))
}
