//! Coffee-shop discovery on OpenStreetMap data.
//!
//! Geocodes an address with Nominatim, queries Overpass mirrors for nearby
//! `amenity=cafe` features, and normalises each one into a [`ShopRecord`]
//! with distance, opening-hours status and amenity icons.

pub mod error;
pub mod geo;
pub mod geocode;
pub mod hours;
mod http;
pub mod icons;
pub mod normalize;
pub mod overpass;
pub mod search;
pub mod types;

pub use error::FinderError;
pub use geo::distance_meters;
pub use geocode::GeocodeClient;
pub use hours::{interpret, interpret_at, HoursStatus, OpeningHours};
pub use icons::map_icons;
pub use normalize::{build_address, normalize_element, normalize_element_at};
pub use overpass::{build_query, OverpassClient};
pub use search::{CoffeeFinder, FinderSettings, SearchSession};
pub use types::{Coordinate, NearbyShops, RawElement, ShopRecord};
