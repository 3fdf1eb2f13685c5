//! Nearby-café lookup over an ordered list of Overpass API mirrors.
//!
//! Mirrors are tried strictly in order, one attempt each. Transient failures
//! (network errors, timeouts, 5xx, 429, undecodable bodies) move on to the
//! next mirror; any other non-2xx status means the query itself was rejected
//! and stops the search. The first successful response wins.

use cafely_core::DEFAULT_OVERPASS_MIRRORS;
use chrono::Local;
use reqwest::{header::ACCEPT, Client, StatusCode, Url};
use serde_json::Value;

use crate::error::FinderError;
use crate::http::{build_http_client, parse_service_url};
use crate::normalize::normalize_element_at;
use crate::types::{Coordinate, NearbyShops, RawElement, ShopRecord};

/// Server-side query timeout requested in the Overpass QL header.
const QUERY_TIMEOUT_SECS: u32 = 25;

/// Result of a single mirror attempt.
#[derive(Debug)]
pub(crate) enum MirrorOutcome {
    Success(Vec<RawElement>),
    Transient(FinderError),
    Fatal(FinderError),
}

/// Overpass QL for every café node, way and relation within `radius_m`.
#[must_use]
pub fn build_query(center: Coordinate, radius_m: u32) -> String {
    let around = format!("around:{radius_m},{},{}", center.lat, center.lon);
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n\
         (\n  \
         node[\"amenity\"=\"cafe\"]({around});\n  \
         way[\"amenity\"=\"cafe\"]({around});\n  \
         relation[\"amenity\"=\"cafe\"]({around});\n\
         );\n\
         out center tags;"
    )
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    mirrors: Vec<Url>,
}

impl OverpassClient {
    /// Creates a client over the default public mirrors.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FinderError> {
        Self::with_mirrors(timeout_secs, user_agent, &DEFAULT_OVERPASS_MIRRORS)
    }

    /// Creates a client over custom mirrors, tried in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`FinderError::InvalidInput`] if the list is empty or holds an
    /// invalid URL.
    pub fn with_mirrors<S: AsRef<str>>(
        timeout_secs: u64,
        user_agent: &str,
        mirrors: &[S],
    ) -> Result<Self, FinderError> {
        Self::with_client(build_http_client(timeout_secs, user_agent)?, mirrors)
    }

    /// Wraps an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::InvalidInput`] if the list is empty or holds an
    /// invalid URL.
    pub fn with_client<S: AsRef<str>>(client: Client, mirrors: &[S]) -> Result<Self, FinderError> {
        if mirrors.is_empty() {
            return Err(FinderError::InvalidInput(
                "at least one Overpass mirror is required".to_string(),
            ));
        }
        let mirrors = mirrors
            .iter()
            .map(|m| parse_service_url(m.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { client, mirrors })
    }

    #[must_use]
    pub fn mirrors(&self) -> &[Url] {
        &self.mirrors
    }

    /// Cafés within `radius_m` of `center`, nearest first.
    ///
    /// # Errors
    ///
    /// - [`FinderError::InvalidInput`] for an out-of-range coordinate or a zero radius.
    /// - [`FinderError::QueryRejected`] if a mirror rejects the query.
    /// - [`FinderError::AllMirrorsUnavailable`] if every mirror fails transiently.
    pub async fn find_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<NearbyShops, FinderError> {
        if !center.is_valid() {
            return Err(FinderError::InvalidInput(format!(
                "coordinate ({}, {}) is out of range",
                center.lat, center.lon
            )));
        }
        if radius_m == 0 {
            return Err(FinderError::InvalidInput(
                "search radius must be positive".to_string(),
            ));
        }

        let elements = self.fetch_elements(&build_query(center, radius_m)).await?;

        let now = Local::now();
        let mut results: Vec<ShopRecord> = elements
            .into_iter()
            .map(|raw| normalize_element_at(raw, center, &now))
            .collect();
        sort_by_distance(&mut results);

        tracing::info!(
            lat = center.lat,
            lon = center.lon,
            radius_m,
            count = results.len(),
            "nearby cafés resolved"
        );

        Ok(NearbyShops {
            user: center,
            results,
        })
    }

    /// Runs `query` against each mirror in order until one succeeds.
    ///
    /// # Errors
    ///
    /// - [`FinderError::QueryRejected`] on the first fatal outcome.
    /// - [`FinderError::AllMirrorsUnavailable`] once every mirror has failed
    ///   transiently.
    pub(crate) async fn fetch_elements(&self, query: &str) -> Result<Vec<RawElement>, FinderError> {
        let mut attempts = 0usize;
        let mut last_error = None;

        for mirror in &self.mirrors {
            attempts += 1;
            match self.try_mirror(mirror, query).await {
                MirrorOutcome::Success(elements) => {
                    tracing::debug!(mirror = %mirror, elements = elements.len(), "Overpass query succeeded");
                    return Ok(elements);
                }
                MirrorOutcome::Transient(err) => {
                    tracing::warn!(mirror = %mirror, error = %err, "Overpass mirror unavailable, trying next");
                    last_error = Some(err);
                }
                MirrorOutcome::Fatal(err) => {
                    tracing::error!(mirror = %mirror, error = %err, "Overpass query rejected");
                    return Err(err);
                }
            }
        }

        let last_error = last_error.unwrap_or_else(|| {
            FinderError::InvalidInput("no Overpass mirrors configured".to_string())
        });
        Err(FinderError::AllMirrorsUnavailable {
            attempts,
            last_error: Box::new(last_error),
        })
    }

    async fn try_mirror(&self, mirror: &Url, query: &str) -> MirrorOutcome {
        let response = match self
            .client
            .post(mirror.clone())
            .header(ACCEPT, "application/json")
            .form(&[("data", query)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return MirrorOutcome::Transient(FinderError::Http(e)),
        };

        let status = response.status();
        if let Some(outcome) = classify_status(status, mirror) {
            return outcome;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return MirrorOutcome::Transient(FinderError::Http(e)),
        };

        match decode_elements(&body, mirror) {
            Ok(elements) => MirrorOutcome::Success(elements),
            Err(e) => MirrorOutcome::Transient(e),
        }
    }
}

/// `None` for success statuses; otherwise the failed outcome.
fn classify_status(status: StatusCode, mirror: &Url) -> Option<MirrorOutcome> {
    if status.is_success() {
        return None;
    }
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return Some(MirrorOutcome::Transient(FinderError::UnexpectedStatus {
            status: status.as_u16(),
            url: mirror.to_string(),
        }));
    }
    Some(MirrorOutcome::Fatal(FinderError::QueryRejected {
        mirror: mirror.to_string(),
        status: status.as_u16(),
    }))
}

/// Decodes the `elements` array, dropping entries that fail to decode or
/// carry no usable position. A missing array is an empty result.
fn decode_elements(body: &str, mirror: &Url) -> Result<Vec<RawElement>, FinderError> {
    let value: Value = serde_json::from_str(body).map_err(|e| FinderError::Deserialize {
        context: format!("Overpass response from {mirror}"),
        source: e,
    })?;

    if let Some(remark) = value.get("remark").and_then(Value::as_str) {
        tracing::warn!(mirror = %mirror, remark, "Overpass returned a remark");
    }

    let Some(elements) = value.get("elements").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let total = elements.len();
    let decoded: Vec<RawElement> = elements
        .iter()
        .filter_map(|el| serde_json::from_value::<RawElement>(el.clone()).ok())
        .filter(|el| el.position().is_some())
        .collect();

    if decoded.len() < total {
        tracing::debug!(dropped = total - decoded.len(), "skipped undecodable Overpass elements");
    }
    Ok(decoded)
}

/// Ascending distance; records without a distance keep their order at the end.
fn sort_by_distance(results: &mut [ShopRecord]) {
    results.sort_by(|a, b| match (a.distance_m, b.distance_m) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[cfg(test)]
#[path = "overpass_test.rs"]
mod tests;
