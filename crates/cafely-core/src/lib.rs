mod app_config;
pub mod catalog;
mod config;
pub mod preferences;
pub mod quiz;
pub mod recommend;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, load_configured_catalog, CaffeineLevel, Drink, DrinkCatalog};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_NOMINATIM_URL, DEFAULT_OVERPASS_MIRRORS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEARCH_RADIUS_METERS, DEFAULT_USER_AGENT,
};
pub use preferences::{PreferenceSet, QuestionKey};
pub use quiz::{Question, QuizError, QuizSession, QUESTIONS};
pub use recommend::{rank_drinks, recommend_drinks, score_drink, ScoredDrink, MAX_RECOMMENDATIONS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read drink catalog at {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON drink catalog: {0}")]
    CatalogJson(#[from] serde_json::Error),

    #[error("failed to parse YAML drink catalog: {0}")]
    CatalogYaml(#[from] serde_yaml::Error),

    #[error("catalog validation error: {0}")]
    Validation(String),
}
