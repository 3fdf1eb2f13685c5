//! The drink catalog: immutable drink records loaded once at startup.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::preferences::PreferenceSet;
use crate::recommend::recommend_drinks;
use crate::ConfigError;

/// Catalog compiled into the binary, used when no catalog path is configured.
const EMBEDDED_CATALOG: &str = include_str!("../../../config/drinks.json");

/// Caffeine bucket derived from a milligram quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaffeineLevel {
    High,
    Medium,
    Low,
    None,
}

impl CaffeineLevel {
    /// Buckets a milligram quantity: `0` (or less) is `None`, below 40 is
    /// `Low`, 40 through 100 inclusive is `Medium`, above 100 is `High`.
    #[must_use]
    pub fn from_mg(mg: f64) -> Self {
        if mg.is_nan() || mg <= 0.0 {
            CaffeineLevel::None
        } else if mg < 40.0 {
            CaffeineLevel::Low
        } else if mg <= 100.0 {
            CaffeineLevel::Medium
        } else {
            CaffeineLevel::High
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CaffeineLevel::High => "High",
            CaffeineLevel::Medium => "Medium",
            CaffeineLevel::Low => "Low",
            CaffeineLevel::None => "None",
        }
    }
}

impl std::fmt::Display for CaffeineLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog entry.
///
/// Categorical attributes stay as strings: matching is case-insensitive and
/// whitespace-tolerant, so the raw catalog spelling is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub name: String,
    /// Stored caffeine category, consulted only when `caffeine_mg` is absent.
    #[serde(default)]
    pub caffeine: Option<String>,
    #[serde(default)]
    pub caffeine_mg: Option<f64>,
    #[serde(default)]
    pub temp: String,
    #[serde(default)]
    pub flavor: String,
    #[serde(default)]
    pub strength: String,
    /// Some catalog exports carry this key as `" category"` (leading space);
    /// the alias folds both spellings into one field at load time.
    #[serde(default, alias = " category")]
    pub category: String,
}

impl Drink {
    /// Caffeine category used for matching.
    ///
    /// Derived from `caffeine_mg` when present, otherwise the stored
    /// `caffeine` string, otherwise `"None"`.
    #[must_use]
    pub fn caffeine_category(&self) -> &str {
        match (self.caffeine_mg, self.caffeine.as_deref()) {
            (Some(mg), _) => CaffeineLevel::from_mg(mg).as_str(),
            (None, Some(stored)) if !stored.trim().is_empty() => stored.trim(),
            (None, _) => CaffeineLevel::None.as_str(),
        }
    }

    /// `true` when the drink has no milligram figure or a figure of zero.
    #[must_use]
    pub fn has_no_measured_caffeine(&self) -> bool {
        match self.caffeine_mg {
            None => true,
            Some(mg) => mg.abs() < f64::EPSILON,
        }
    }
}

/// Ordered, validated drink catalog. Read-only after construction.
#[derive(Debug, Clone)]
pub struct DrinkCatalog {
    drinks: Vec<Drink>,
}

impl DrinkCatalog {
    /// Builds a catalog, validating names and caffeine figures.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for blank or duplicate names and
    /// negative or non-finite caffeine quantities.
    pub fn new(drinks: Vec<Drink>) -> Result<Self, ConfigError> {
        validate_drinks(&drinks)?;
        Ok(Self { drinks })
    }

    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded catalog fails to parse or validate.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    /// Parses a catalog from a JSON array of drinks.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CatalogJson`] on malformed JSON or
    /// [`ConfigError::Validation`] if validation fails.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let drinks: Vec<Drink> = serde_json::from_str(content)?;
        Self::new(drinks)
    }

    /// Parses a catalog from a YAML list of drinks.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CatalogYaml`] on malformed YAML or
    /// [`ConfigError::Validation`] if validation fails.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let drinks: Vec<Drink> = serde_yaml::from_str(content)?;
        Self::new(drinks)
    }

    #[must_use]
    pub fn drinks(&self) -> &[Drink] {
        &self.drinks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drinks.is_empty()
    }

    /// Case-insensitive lookup by drink name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Drink> {
        let wanted = name.trim().to_lowercase();
        self.drinks
            .iter()
            .find(|d| d.name.trim().to_lowercase() == wanted)
    }

    /// Top recommendations for `preferences`, best first.
    #[must_use]
    pub fn recommend(&self, preferences: &PreferenceSet) -> Vec<String> {
        recommend_drinks(&self.drinks, preferences)
    }
}

/// Load and validate a drink catalog from a JSON or YAML file.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML; anything else as JSON.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<DrinkCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let catalog = if is_yaml {
        DrinkCatalog::from_yaml_str(&content)?
    } else {
        DrinkCatalog::from_json_str(&content)?
    };

    tracing::info!(
        path = %path.display(),
        drinks = catalog.len(),
        "loaded drink catalog"
    );
    Ok(catalog)
}

/// Load the catalog named by configuration, or the embedded one when unset.
///
/// # Errors
///
/// Returns `ConfigError` if the selected catalog cannot be loaded.
pub fn load_configured_catalog(path: Option<&Path>) -> Result<DrinkCatalog, ConfigError> {
    match path {
        Some(path) => load_catalog(path),
        None => DrinkCatalog::embedded(),
    }
}

fn validate_drinks(drinks: &[Drink]) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for drink in drinks {
        if drink.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "drink name must be non-empty".to_string(),
            ));
        }

        if let Some(mg) = drink.caffeine_mg {
            if !mg.is_finite() || mg < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "drink '{}' has invalid caffeine_mg {mg}; must be a non-negative number",
                    drink.name
                )));
            }
        }

        if !seen_names.insert(drink.name.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate drink name: '{}'",
                drink.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
