#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Geocoding for farm leads.
//!
//! Converts free-text addresses to WGS84 coordinates via Nominatim /
//! OpenStreetMap. Calls go through [`geocode_with_retry`], which retries
//! transient failures (timeouts, service unavailability, rate limiting)
//! with exponential backoff and surfaces everything else immediately.
//!
//! A successful call that resolves no location (`Ok(None)`) is distinct
//! from a transport failure: the service answered, but the address is not
//! findable.

pub mod nominatim;

use std::time::Duration;

use async_trait::async_trait;

/// A geocoding result with coordinates.
#[derive(Debug, Clone)]
pub struct GeocodedLocation {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// The canonical display name returned by the geocoder.
    pub display_name: Option<String>,
}

/// Errors from geocoding operations.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limit exceeded (HTTP 429).
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The service reported a server-side failure (HTTP 5xx).
    #[error("Service unavailable: HTTP {status}")]
    ServiceUnavailable {
        /// The HTTP status code returned.
        status: u16,
    },

    /// Any other non-success HTTP status. Not retryable.
    #[error("HTTP status {status}")]
    Status {
        /// The HTTP status code returned.
        status: u16,
    },

    /// Response parsing failed. Not retryable.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

impl GeocodeError {
    /// Returns `true` if the error is likely transient and worth retrying.
    ///
    /// Transient classes: request timeouts and connection failures, rate
    /// limiting, and server errors. Client errors and malformed responses
    /// are permanent.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited | Self::ServiceUnavailable { .. } => true,
            Self::Status { .. } | Self::Parse { .. } => false,
        }
    }
}

/// Trait for address-to-coordinate lookup services.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a free-text address to a location.
    ///
    /// Returns `Ok(None)` when the service answers but finds no match for
    /// the address.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the request or response handling fails.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedLocation>, GeocodeError>;
}

/// Retry schedule for transient geocoding failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt cap, including the first call.
    pub max_attempts: u32,
    /// Backoff before the first retry; doubles each attempt.
    pub base_delay: Duration,
    /// Upper bound on any single backoff wait.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Returns the backoff wait before retry number `attempt` (1-based).
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1 << exponent).min(self.max_delay)
    }
}

/// Geocodes an address, retrying transient failures per the policy.
///
/// Permanent failures and retry exhaustion surface immediately to the
/// caller; they must not be retried further up the stack.
///
/// # Errors
///
/// Returns the final [`GeocodeError`] once `policy.max_attempts` is
/// reached or a non-transient error occurs.
pub async fn geocode_with_retry(
    geocoder: &dyn Geocoder,
    address: &str,
    policy: &RetryPolicy,
) -> Result<Option<GeocodedLocation>, GeocodeError> {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match geocoder.geocode(address).await {
            Ok(location) => return Ok(location),
            Err(e) if e.is_transient() && attempt < policy.max_attempts => {
                let delay = policy.backoff_delay(attempt);
                log::warn!(
                    "Geocode attempt {attempt}/{} failed ({e}), retrying in {delay:?}...",
                    policy.max_attempts
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    struct ScriptedGeocoder {
        responses: Mutex<VecDeque<Result<Option<GeocodedLocation>, GeocodeError>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedGeocoder {
        fn new(responses: Vec<Result<Option<GeocodedLocation>, GeocodeError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl Geocoder for ScriptedGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Option<GeocodedLocation>, GeocodeError> {
            *self.calls.lock().unwrap() += 1;
            self.responses.lock().unwrap().pop_front().unwrap_or(Ok(None))
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
        }
    }

    fn location() -> GeocodedLocation {
        GeocodedLocation {
            latitude: -25.8976,
            longitude: 28.2184,
            display_name: None,
        }
    }

    #[tokio::test]
    async fn retries_transient_errors_until_success() {
        let geocoder = ScriptedGeocoder::new(vec![
            Err(GeocodeError::ServiceUnavailable { status: 503 }),
            Err(GeocodeError::RateLimited),
            Ok(Some(location())),
        ]);

        let result = geocode_with_retry(&geocoder, "Pretoria", &fast_policy())
            .await
            .unwrap();

        assert!(result.is_some());
        assert_eq!(geocoder.calls(), 3);
    }

    #[tokio::test]
    async fn surfaces_the_last_error_after_exhausting_attempts() {
        let geocoder = ScriptedGeocoder::new(vec![
            Err(GeocodeError::ServiceUnavailable { status: 503 }),
            Err(GeocodeError::ServiceUnavailable { status: 502 }),
            Err(GeocodeError::ServiceUnavailable { status: 500 }),
        ]);

        let err = geocode_with_retry(&geocoder, "Pretoria", &fast_policy())
            .await
            .unwrap_err();

        assert!(matches!(err, GeocodeError::ServiceUnavailable { status: 500 }));
        assert_eq!(geocoder.calls(), 3);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let geocoder = ScriptedGeocoder::new(vec![Err(GeocodeError::Status { status: 404 })]);

        let err = geocode_with_retry(&geocoder, "Pretoria", &fast_policy())
            .await
            .unwrap_err();

        assert!(matches!(err, GeocodeError::Status { status: 404 }));
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn no_location_is_a_success_not_a_retry() {
        let geocoder = ScriptedGeocoder::new(vec![Ok(None)]);

        let result = geocode_with_retry(&geocoder, "Nowhere, Mars", &fast_policy())
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(geocoder.calls(), 1);
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(8));
        assert_eq!(policy.backoff_delay(4), Duration::from_secs(10));
    }

    #[test]
    fn classifies_transient_errors() {
        assert!(GeocodeError::RateLimited.is_transient());
        assert!(GeocodeError::ServiceUnavailable { status: 503 }.is_transient());
        assert!(!GeocodeError::Status { status: 404 }.is_transient());
        assert!(
            !GeocodeError::Parse {
                message: "bad".to_string()
            }
            .is_transient()
        );
    }
}
