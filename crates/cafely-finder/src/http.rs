use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::FinderError;

pub(crate) const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Shared `reqwest` client for Nominatim and Overpass requests.
pub(crate) fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, FinderError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(user_agent)
        .build()?)
}

pub(crate) fn parse_service_url(raw: &str) -> Result<Url, FinderError> {
    Url::parse(raw.trim())
        .map_err(|e| FinderError::InvalidInput(format!("invalid service URL '{raw}': {e}")))
}
