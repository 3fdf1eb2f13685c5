use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Drink catalog file; `None` selects the catalog compiled into the binary.
    pub catalog_path: Option<PathBuf>,
    pub nominatim_url: String,
    /// Overpass interpreter endpoints, tried in order.
    pub overpass_mirrors: Vec<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_radius_meters: u32,
    pub rate_limit_per_minute: usize,
}
