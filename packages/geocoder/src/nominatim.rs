//! Nominatim / OpenStreetMap geocoder client.
//!
//! Free-form search against the public instance. Nominatim has strict
//! rate limits: **1 request per second** maximum; the seeding job's
//! per-lead delay keeps usage under that cap.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use std::time::Duration;

use async_trait::async_trait;

use crate::{GeocodeError, GeocodedLocation, Geocoder};

/// Public Nominatim search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Geocoder backed by the Nominatim free-form search endpoint.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Builds a client against the public Nominatim instance.
    ///
    /// Nominatim's usage policy requires an identifying user-agent.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the HTTP client cannot be constructed.
    pub fn new(user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(user_agent, DEFAULT_BASE_URL)
    }

    /// Builds a client against a custom endpoint (e.g., a self-hosted
    /// instance).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the HTTP client cannot be constructed.
    pub fn with_base_url(user_agent: &str, base_url: &str) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedLocation>, GeocodeError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }
        if status.is_server_error() {
            return Err(GeocodeError::ServiceUnavailable {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(GeocodeError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_response(&body)
    }
}

/// Parses a Nominatim JSONv2 response.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeocodedLocation>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let latitude = first["lat"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lat in Nominatim response".to_string(),
        })?;

    let longitude = first["lon"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lon in Nominatim response".to_string(),
        })?;

    let display_name = first["display_name"].as_str().map(String::from);

    Ok(Some(GeocodedLocation {
        latitude,
        longitude,
        display_name,
    }))
}
