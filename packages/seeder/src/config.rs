//! Job configuration read from the environment at process start.
//!
//! Constructed once and passed by parameter into the provisioning and
//! seeding entry points; there is no ambient settings object.

use std::time::Duration;

/// Environment variable holding the `PostgreSQL` connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable holding the per-lead delay in seconds.
pub const REQUEST_DELAY_VAR: &str = "REQUEST_DELAY";

/// Per-lead delay when `REQUEST_DELAY` is unset.
const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Errors from reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The connection string is not set.
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    /// The delay value is not a non-negative number of seconds.
    #[error("Invalid REQUEST_DELAY value {value:?}: {message}")]
    InvalidRequestDelay {
        /// The offending value.
        value: String,
        /// Why it was rejected.
        message: String,
    },
}

/// Job configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Pause after each lead that reached the geocoder.
    pub request_delay: Duration,
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `DATABASE_URL` is missing or
    /// `REQUEST_DELAY` is not a non-negative number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var(DATABASE_URL_VAR).map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let request_delay = match std::env::var(REQUEST_DELAY_VAR) {
            Ok(value) => parse_delay(&value)?,
            Err(_) => DEFAULT_REQUEST_DELAY,
        };

        Ok(Self {
            database_url,
            request_delay,
        })
    }
}

/// Parses a delay in (possibly fractional) seconds.
fn parse_delay(value: &str) -> Result<Duration, ConfigError> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|e| ConfigError::InvalidRequestDelay {
            value: value.to_string(),
            message: format!("{e}"),
        })?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ConfigError::InvalidRequestDelay {
            value: value.to_string(),
            message: "must be a non-negative number of seconds".to_string(),
        });
    }

    Ok(Duration::from_secs_f64(seconds))
}
