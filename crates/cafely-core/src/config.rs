use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Tried in order; later entries are fallbacks.
pub const DEFAULT_OVERPASS_MIRRORS: [&str; 3] = [
    "https://overpass-api.de/api/interpreter",
    "https://overpass.kumi.systems/api/interpreter",
    "https://overpass.private.coffee/api/interpreter",
];

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 25;
pub const DEFAULT_USER_AGENT: &str = "cafely/1.0 (coffee-finder)";
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 1_500;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so only malformed values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("CAFELY_ENV", "development"));

    let bind_addr = or_default("CAFELY_BIND_ADDR", "127.0.0.1:5000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("CAFELY_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("CAFELY_LOG_LEVEL", "info");

    let catalog_path = lookup("CAFELY_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let nominatim_url = or_default("CAFELY_NOMINATIM_URL", DEFAULT_NOMINATIM_URL);
    let overpass_mirrors = match lookup("CAFELY_OVERPASS_MIRRORS") {
        Ok(raw) => parse_mirror_list(&raw),
        Err(_) => DEFAULT_OVERPASS_MIRRORS
            .iter()
            .map(|m| (*m).to_string())
            .collect(),
    };
    if overpass_mirrors.is_empty() {
        return Err(invalid(
            "CAFELY_OVERPASS_MIRRORS",
            "at least one mirror URL is required".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64(
        "CAFELY_REQUEST_TIMEOUT_SECS",
        &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
    )?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "CAFELY_REQUEST_TIMEOUT_SECS",
            "timeout must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("CAFELY_USER_AGENT", DEFAULT_USER_AGENT);
    let search_radius_meters = parse_u32(
        "CAFELY_SEARCH_RADIUS_METERS",
        &DEFAULT_SEARCH_RADIUS_METERS.to_string(),
    )?;
    let rate_limit_per_minute = parse_usize("CAFELY_RATE_LIMIT_PER_MINUTE", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        nominatim_url,
        overpass_mirrors,
        request_timeout_secs,
        user_agent,
        search_radius_meters,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Split a comma-separated mirror list, dropping blanks.
fn parse_mirror_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
