//! Tag-to-symbol mapping for shop amenities.

use std::collections::BTreeMap;

const CAFE: &str = "☕";
const WIFI: &str = "📶";
const WHEELCHAIR: &str = "♿";
const OUTDOOR_SEATING: &str = "🌳";
const TAKEAWAY: &str = "🥡";
const DRIVE_THROUGH: &str = "🚗";
const CARDS: &str = "💳";
const SMOKING: &str = "🚬";

const WIFI_KEYS: [&str; 3] = ["wifi", "internet_access", "wlan"];
const WIFI_VALUES: [&str; 5] = ["yes", "wlan", "wifi", "customers", "free"];
const CARD_KEYS: [&str; 3] = ["payment:cards", "payment:credit_cards", "payment:debit_cards"];

/// Amenity symbols for a shop's tags, café first, without duplicates.
#[must_use]
pub fn map_icons(tags: &BTreeMap<String, String>) -> Vec<&'static str> {
    let value = |key: &str| tags.get(key).map(|v| v.trim().to_ascii_lowercase());
    let is_yes = |key: &str| value(key).is_some_and(|v| v == "yes");

    let mut icons = vec![CAFE];
    let mut push = |icon: &'static str| {
        if !icons.contains(&icon) {
            icons.push(icon);
        }
    };

    if WIFI_KEYS
        .iter()
        .filter_map(|&key| value(key))
        .any(|v| WIFI_VALUES.contains(&v.as_str()))
    {
        push(WIFI);
    }
    if is_yes("wheelchair") {
        push(WHEELCHAIR);
    }
    if is_yes("outdoor_seating") {
        push(OUTDOOR_SEATING);
    }
    if is_yes("takeaway") {
        push(TAKEAWAY);
    }
    if is_yes("drive_through") {
        push(DRIVE_THROUGH);
    }
    if CARD_KEYS.iter().any(|&key| is_yes(key)) {
        push(CARDS);
    }
    if value("cuisine").is_some_and(|v| v.contains("coffee")) {
        push(CAFE);
    }
    if value("smoking").is_some_and(|v| !v.is_empty() && v != "no") {
        push(SMOKING);
    }

    icons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn bare_cafe_gets_cup_only() {
        assert_eq!(map_icons(&BTreeMap::new()), vec!["☕"]);
    }

    #[test]
    fn amenities_in_fixed_order() {
        let t = tags(&[
            ("smoking", "outside"),
            ("takeaway", "yes"),
            ("internet_access", "WLAN"),
            ("wheelchair", "yes"),
            ("payment:debit_cards", "yes"),
            ("outdoor_seating", "Yes"),
            ("drive_through", "yes"),
        ]);
        assert_eq!(map_icons(&t), vec!["☕", "📶", "♿", "🌳", "🥡", "🚗", "💳", "🚬"]);
    }

    #[test]
    fn coffee_cuisine_does_not_repeat_cup() {
        let t = tags(&[("cuisine", "coffee_shop;cake")]);
        assert_eq!(map_icons(&t), vec!["☕"]);
    }

    #[test]
    fn negative_values_are_ignored() {
        let t = tags(&[
            ("wifi", "no"),
            ("wheelchair", "limited"),
            ("smoking", "no"),
            ("payment:cards", "no"),
        ]);
        assert_eq!(map_icons(&t), vec!["☕"]);
    }

    #[test]
    fn customer_wifi_counts() {
        let t = tags(&[("wlan", "customers")]);
        assert_eq!(map_icons(&t), vec!["☕", "📶"]);
    }
}
