//! Address geocoding against the Nominatim search API.

use cafely_core::DEFAULT_NOMINATIM_URL;
use reqwest::{header::ACCEPT, Client, Url};
use serde_json::Value;

use crate::error::FinderError;
use crate::http::{build_http_client, parse_service_url};
use crate::types::Coordinate;

const SERVICE: &str = "Nominatim";

/// Resolves free-text addresses to coordinates. Only the top match is used.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: Url,
}

impl GeocodeClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FinderError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_NOMINATIM_URL)
    }

    /// Creates a client with a custom search endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`FinderError::InvalidInput`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, FinderError> {
        Self::with_client(build_http_client(timeout_secs, user_agent)?, base_url)
    }

    /// Wraps an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::InvalidInput`] if `base_url` is not a valid URL.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, FinderError> {
        Ok(Self {
            client,
            base_url: parse_service_url(base_url)?,
        })
    }

    /// Geocodes `address` to the top Nominatim match.
    ///
    /// # Errors
    ///
    /// - [`FinderError::InvalidInput`] if `address` is blank (no request is sent).
    /// - [`FinderError::NotFound`] if Nominatim returns no results.
    /// - [`FinderError::BadResponse`] if the body is not a JSON array or the
    ///   top result has no usable coordinates.
    /// - [`FinderError::UnexpectedStatus`] on a non-2xx response.
    /// - [`FinderError::Http`] on network failure.
    pub async fn geocode(&self, address: &str) -> Result<Coordinate, FinderError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(FinderError::InvalidInput(
                "address must not be empty".to_string(),
            ));
        }

        let url = self.build_url(address);
        tracing::debug!(address, "geocoding address");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FinderError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let coordinate = parse_search_body(&body, address)?;
        tracing::debug!(address, lat = coordinate.lat, lon = coordinate.lon, "geocoded");
        Ok(coordinate)
    }

    fn build_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", address)
            .append_pair("limit", "1")
            .append_pair("addressdetails", "0");
        url
    }
}

fn parse_search_body(body: &str, address: &str) -> Result<Coordinate, FinderError> {
    let value: Value = serde_json::from_str(body).map_err(|e| FinderError::BadResponse {
        service: SERVICE,
        reason: format!("body is not JSON: {e}"),
    })?;

    let results = value.as_array().ok_or_else(|| FinderError::BadResponse {
        service: SERVICE,
        reason: "expected a JSON array of results".to_string(),
    })?;

    let top = results.first().ok_or_else(|| FinderError::NotFound {
        address: address.to_owned(),
    })?;

    match (number_field(top, "lat"), number_field(top, "lon")) {
        (Some(lat), Some(lon)) if Coordinate::new(lat, lon).is_valid() => {
            Ok(Coordinate::new(lat, lon))
        }
        _ => Err(FinderError::BadResponse {
            service: SERVICE,
            reason: "top result has no numeric lat/lon".to_string(),
        }),
    }
}

/// Nominatim encodes coordinates as strings; plain numbers are accepted too.
fn number_field(item: &Value, key: &str) -> Option<f64> {
    let parsed = match item.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
