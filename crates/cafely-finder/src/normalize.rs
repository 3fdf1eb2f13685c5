use std::collections::BTreeMap;

use chrono::{DateTime, Local, TimeZone};

use crate::geo::distance_meters;
use crate::hours::interpret_at;
use crate::icons::map_icons;
use crate::types::{Coordinate, RawElement, ShopRecord};

/// Name used when an element has no `name` tag.
pub const DEFAULT_SHOP_NAME: &str = "Coffee shop";
pub const SOURCE_OSM: &str = "OSM";

const ADDRESS_KEYS: [&str; 6] = [
    "addr:housenumber",
    "addr:street",
    "addr:city",
    "addr:state",
    "addr:postcode",
    "addr:country",
];

/// Normalises an Overpass element relative to the search origin.
#[must_use]
pub fn normalize_element(raw: RawElement, user: Coordinate) -> ShopRecord {
    normalize_element_at(raw, user, &Local::now())
}

/// [`normalize_element`] with opening hours evaluated at `now`.
pub fn normalize_element_at<Tz>(raw: RawElement, user: Coordinate, now: &DateTime<Tz>) -> ShopRecord
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let coordinate = raw.position().filter(Coordinate::is_valid);
    let name = raw
        .tags
        .get("name")
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_SHOP_NAME)
        .to_owned();

    ShopRecord {
        id: format!("{}/{}", raw.element_type, raw.id),
        name,
        coordinate,
        address: build_address(&raw.tags),
        distance_m: coordinate.map(|c| distance_meters(user, c)),
        opening_hours: interpret_at(raw.tags.get("opening_hours").map(String::as_str), now),
        icons: map_icons(&raw.tags).into_iter().map(str::to_owned).collect(),
        source: SOURCE_OSM.to_owned(),
        tags: raw.tags,
    }
}

/// Street address from `addr:*` tags, most specific part first.
#[must_use]
pub fn build_address(tags: &BTreeMap<String, String>) -> String {
    ADDRESS_KEYS
        .iter()
        .filter_map(|key| tags.get(*key))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::hours::HoursStatus;

    fn element(json: serde_json::Value) -> RawElement {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn node_with_full_tags() {
        let raw = element(serde_json::json!({
            "type": "node",
            "id": 42,
            "lat": 45.501,
            "lon": -73.567,
            "tags": {
                "name": "Café Olimpico",
                "addr:housenumber": "124",
                "addr:street": "Rue Saint-Viateur O",
                "addr:city": "Montréal",
                "opening_hours": "Mo-Su 07:00-23:00",
                "outdoor_seating": "yes"
            }
        }));
        let user = Coordinate::new(45.5, -73.567);
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();

        let shop = normalize_element_at(raw, user, &now);
        assert_eq!(shop.id, "node/42");
        assert_eq!(shop.name, "Café Olimpico");
        assert_eq!(shop.address, "124, Rue Saint-Viateur O, Montréal");
        assert_eq!(shop.source, "OSM");
        assert_eq!(shop.icons, vec!["☕", "🌳"]);
        assert_eq!(shop.opening_hours.status, HoursStatus::OpenNow);
        let d = shop.distance_m.unwrap();
        assert!((d - 111.2).abs() < 1.0, "got {d}");
    }

    #[test]
    fn way_uses_center_and_default_name() {
        let raw = element(serde_json::json!({
            "type": "way",
            "id": 7,
            "center": { "lat": 10.0, "lon": 20.0 }
        }));
        let shop = normalize_element(raw, Coordinate::new(10.0, 20.0));
        assert_eq!(shop.id, "way/7");
        assert_eq!(shop.name, DEFAULT_SHOP_NAME);
        assert_eq!(shop.coordinate, Some(Coordinate::new(10.0, 20.0)));
        assert_eq!(shop.address, "");
        assert_eq!(shop.opening_hours.status, HoursStatus::NoData);
    }

    #[test]
    fn missing_position_has_no_distance() {
        let raw = element(serde_json::json!({ "type": "relation", "id": 3, "tags": {} }));
        let shop = normalize_element(raw, Coordinate::new(0.0, 0.0));
        assert_eq!(shop.coordinate, None);
        assert_eq!(shop.distance_m, None);
    }

    #[test]
    fn address_skips_blank_parts_in_fixed_order() {
        let tags: BTreeMap<String, String> = [
            ("addr:country", "CA"),
            ("addr:postcode", " "),
            ("addr:street", "Main St"),
            ("addr:housenumber", "5"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
        assert_eq!(build_address(&tags), "5, Main St, CA");
    }
}
