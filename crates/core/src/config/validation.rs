//! Configuration validation rules.

use crate::config::AppConfig;
use thiserror::Error;

/// Largest accepted `max_cells`; the solver table is (m+1)×(n+1) `i64`s.
const MAX_CELLS_CEILING: usize = 25_000_000;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `max_cells` is 0 or above the
    /// ceiling, or if caching is enabled with an empty `db_path`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cells == 0 {
            return Err(ConfigError::Invalid { field: "max_cells".into(), reason: "must be greater than 0".into() });
        }
        if self.max_cells > MAX_CELLS_CEILING {
            return Err(ConfigError::Invalid {
                field: "max_cells".into(),
                reason: format!("must not exceed {MAX_CELLS_CEILING}"),
            });
        }

        if self.cache_enabled && self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "db_path".into(), reason: "must not be empty".into() });
        }

        if !self.cache_enabled {
            tracing::warn!("cache_enabled is false; every request will be solved from scratch");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_cells_zero() {
        let config = AppConfig { max_cells: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_cells"));
    }

    #[test]
    fn test_validate_max_cells_exceeds_ceiling() {
        let config = AppConfig { max_cells: MAX_CELLS_CEILING + 1, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_cells"));
    }

    #[test]
    fn test_validate_empty_db_path() {
        let config = AppConfig { db_path: PathBuf::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "db_path"));
    }

    #[test]
    fn test_empty_db_path_allowed_without_cache() {
        let config = AppConfig { db_path: PathBuf::new(), cache_enabled: false, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_edge_values() {
        let config = AppConfig { max_cells: 1, ..Default::default() };
        assert!(config.validate().is_ok());

        let config = AppConfig { max_cells: MAX_CELLS_CEILING, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
