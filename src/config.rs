//! Engine configuration
//!
//! Stored as JSON, by default at `~/.config/econdex/config.json`. A missing
//! file means defaults.

use crate::hash_index::{DEFAULT_BUCKETS, DEFAULT_MAX_LOAD_FACTOR};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tunables for building and presenting the indexes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Occupied-bucket ratio that triggers a hash-index resize
    pub max_load_factor: f32,
    /// Initial hash-index bucket count
    pub initial_buckets: usize,
    /// Number of legend buckets for need values
    pub legend_buckets: usize,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            initial_buckets: DEFAULT_BUCKETS,
            legend_buckets: 5,
            log_level: "warn".to_string(),
        }
    }
}

impl EngineConfig {
    /// Default config file location
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("econdex").join("config.json"))
    }

    /// Load from a file, or defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config dir: {}", e)))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_load_factor > 0.0 && self.max_load_factor <= 1.0) {
            return Err(Error::Config(format!(
                "max_load_factor must be in (0, 1], got {}",
                self.max_load_factor
            )));
        }
        if self.initial_buckets == 0 {
            return Err(Error::Config("initial_buckets must be positive".into()));
        }
        if self.legend_buckets == 0 {
            return Err(Error::Config("legend_buckets must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = EngineConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.initial_buckets, 100);
        assert!((config.max_load_factor - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = EngineConfig {
            max_load_factor: 0.5,
            initial_buckets: 16,
            legend_buckets: 3,
            log_level: "debug".into(),
        };
        config.save(&path).unwrap();
        assert_eq!(EngineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"initial_buckets": 8}"#).unwrap();
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.initial_buckets, 8);
        assert_eq!(config.legend_buckets, 5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = EngineConfig::default();
        config.max_load_factor = 0.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = EngineConfig::default();
        config.max_load_factor = 1.5;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.initial_buckets = 0;
        assert!(config.validate().is_err());
    }
}
