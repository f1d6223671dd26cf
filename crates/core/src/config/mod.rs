//! Application configuration with layered loading.
//!
//! Sources, highest precedence first:
//!
//! 1. Environment variables (DUNGEON_*)
//! 2. TOML config file (if DUNGEON_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite run database.
    ///
    /// Set via DUNGEON_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Whether solved runs are memoized.
    ///
    /// Set via DUNGEON_CACHE_ENABLED environment variable.
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Largest grid (rows × cols) accepted by dungeon_solve.
    ///
    /// Set via DUNGEON_MAX_CELLS environment variable.
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./dungeon-runs.sqlite")
}

fn default_true() -> bool {
    true
}

fn default_max_cells() -> usize {
    1_000_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { db_path: default_db_path(), cache_enabled: true, max_cells: default_max_cells() }
    }
}

impl AppConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("DUNGEON_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("DUNGEON_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
