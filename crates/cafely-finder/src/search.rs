//! Address-to-cafés orchestration.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cafely_core::{
    AppConfig, DEFAULT_NOMINATIM_URL, DEFAULT_OVERPASS_MIRRORS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SEARCH_RADIUS_METERS, DEFAULT_USER_AGENT,
};

use crate::error::FinderError;
use crate::geocode::GeocodeClient;
use crate::http::build_http_client;
use crate::overpass::OverpassClient;
use crate::types::{Coordinate, NearbyShops};

/// Endpoints and limits for a [`CoffeeFinder`].
#[derive(Debug, Clone)]
pub struct FinderSettings {
    pub nominatim_url: String,
    pub overpass_mirrors: Vec<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_radius_meters: u32,
}

impl Default for FinderSettings {
    fn default() -> Self {
        Self {
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            overpass_mirrors: DEFAULT_OVERPASS_MIRRORS.iter().map(|m| (*m).to_string()).collect(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
        }
    }
}

impl FinderSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            nominatim_url: config.nominatim_url.clone(),
            overpass_mirrors: config.overpass_mirrors.clone(),
            request_timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            search_radius_meters: config.search_radius_meters,
        }
    }
}

/// Geocoder plus Overpass resolver sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct CoffeeFinder {
    geocoder: GeocodeClient,
    overpass: OverpassClient,
    radius_meters: u32,
}

impl CoffeeFinder {
    /// # Errors
    ///
    /// Returns [`FinderError::Http`] if the HTTP client cannot be built, or
    /// [`FinderError::InvalidInput`] for invalid endpoints or a zero radius.
    pub fn new(settings: &FinderSettings) -> Result<Self, FinderError> {
        if settings.search_radius_meters == 0 {
            return Err(FinderError::InvalidInput(
                "search radius must be positive".to_string(),
            ));
        }
        let client = build_http_client(settings.request_timeout_secs, &settings.user_agent)?;
        Ok(Self {
            geocoder: GeocodeClient::with_client(client.clone(), &settings.nominatim_url)?,
            overpass: OverpassClient::with_client(client, &settings.overpass_mirrors)?,
            radius_meters: settings.search_radius_meters,
        })
    }

    /// # Errors
    ///
    /// See [`CoffeeFinder::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FinderError> {
        Self::new(&FinderSettings::from_app_config(config))
    }

    /// Default radius used by [`CoffeeFinder::find_coffee_shops_by_address`].
    #[must_use]
    pub fn radius_meters(&self) -> u32 {
        self.radius_meters
    }

    /// # Errors
    ///
    /// See [`GeocodeClient::geocode`].
    pub async fn geocode(&self, address: &str) -> Result<Coordinate, FinderError> {
        self.geocoder.geocode(address).await
    }

    /// # Errors
    ///
    /// See [`OverpassClient::find_nearby`].
    pub async fn find_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<NearbyShops, FinderError> {
        self.overpass.find_nearby(center, radius_m).await
    }

    /// Geocodes `address` and lists cafés within the configured radius.
    ///
    /// # Errors
    ///
    /// Any error from geocoding or the nearby lookup.
    pub async fn find_coffee_shops_by_address(
        &self,
        address: &str,
    ) -> Result<NearbyShops, FinderError> {
        self.find_coffee_shops_near_address(address, self.radius_meters)
            .await
    }

    /// Like [`CoffeeFinder::find_coffee_shops_by_address`] with an explicit radius.
    ///
    /// # Errors
    ///
    /// Any error from geocoding or the nearby lookup.
    pub async fn find_coffee_shops_near_address(
        &self,
        address: &str,
        radius_m: u32,
    ) -> Result<NearbyShops, FinderError> {
        let center = self.geocoder.geocode(address).await?;
        self.overpass.find_nearby(center, radius_m).await
    }
}

/// One user's search box: only the most recently started search may deliver
/// results.
///
/// Each search takes a generation ticket. A search that finishes after a newer
/// one has started returns [`FinderError::Superseded`] instead of its results.
#[derive(Debug)]
pub struct SearchSession {
    finder: Arc<CoffeeFinder>,
    generation: AtomicU64,
}

impl SearchSession {
    #[must_use]
    pub fn new(finder: Arc<CoffeeFinder>) -> Self {
        Self {
            finder,
            generation: AtomicU64::new(0),
        }
    }

    /// Searches around `address`, using the finder's radius when `radius_m`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// - [`FinderError::Superseded`] if a newer search started meanwhile.
    /// - Any error from the underlying search.
    pub async fn search(
        &self,
        address: &str,
        radius_m: Option<u32>,
    ) -> Result<NearbyShops, FinderError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let radius = radius_m.unwrap_or(self.finder.radius_meters);

        let result = self
            .finder
            .find_coffee_shops_near_address(address, radius)
            .await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(address, ticket, "discarding superseded search");
            return Err(FinderError::Superseded);
        }
        result
    }
}
