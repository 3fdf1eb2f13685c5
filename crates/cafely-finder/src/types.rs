use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hours::OpeningHours;

/// WGS84 latitude/longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Finite and inside the latitude/longitude ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// One café, normalised from an OSM element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopRecord {
    /// `"<element type>/<element id>"`, e.g. `"node/123"`.
    pub id: String,
    pub name: String,
    pub coordinate: Option<Coordinate>,
    pub address: String,
    /// Metres from the search origin, when the element has a position.
    pub distance_m: Option<f64>,
    pub opening_hours: OpeningHours,
    pub icons: Vec<String>,
    pub source: String,
    pub tags: BTreeMap<String, String>,
}

/// Search result: the geocoded origin plus nearby cafés, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyShops {
    pub user: Coordinate,
    pub results: Vec<ShopRecord>,
}

/// Element as returned by Overpass `out center tags`.
///
/// Nodes carry `lat`/`lon`; ways and relations carry `center`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Coordinate>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl RawElement {
    #[must_use]
    pub fn position(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => self.center,
        }
    }
}
