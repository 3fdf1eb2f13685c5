use std::io::Write;
use std::sync::Arc;

use cafely_core::AppConfig;
use cafely_finder::{CoffeeFinder, NearbyShops, SearchSession, ShopRecord};

/// Geocodes `address` and prints nearby cafés, nearest first.
///
/// # Errors
///
/// Returns an error if the finder cannot be built, the search fails, or
/// writing to `out` fails.
pub(crate) async fn run_find<W: Write>(
    config: &AppConfig,
    address: &str,
    radius: Option<u32>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let finder = CoffeeFinder::from_config(config)?;
    let session = SearchSession::new(Arc::new(finder));
    let found = session.search(address, radius).await?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &found)?;
        writeln!(out)?;
    } else {
        write_shops(&found, out)?;
    }
    Ok(())
}

fn write_shops<W: Write>(found: &NearbyShops, out: &mut W) -> anyhow::Result<()> {
    writeln!(
        out,
        "Searching around {:.5}, {:.5}",
        found.user.lat, found.user.lon
    )?;
    if found.results.is_empty() {
        writeln!(out, "No cafés found nearby.")?;
        return Ok(());
    }
    for shop in &found.results {
        writeln!(out, "{}", format_shop(shop))?;
    }
    Ok(())
}

fn format_shop(shop: &ShopRecord) -> String {
    let distance = shop
        .distance_m
        .map_or_else(|| "?".to_string(), format_distance);
    let mut line = format!(
        "{} {} ({distance}) [{}]",
        shop.icons.join(""),
        shop.name,
        shop.opening_hours.status
    );
    if !shop.address.is_empty() {
        line.push_str(" | ");
        line.push_str(&shop.address);
    }
    line
}

fn format_distance(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1_000.0)
    }
}
