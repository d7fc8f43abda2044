//! # Configuration Management Module
//!
//! Training Ground settings are read from a TOML file with three sections:
//!
//! - [`TrainingConfig`] - roster source and graduation level
//! - [`SceneConfig`] - which village scenes get a yard and where it attaches
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use training_ground::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("training.toml").await?;
//!     println!("Graduation level: {}", config.training.graduation_level);
//!
//!     Config::create_default("training.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [training]
//! roster_file = "data/masters.tsv"   # omit to use the bundled roster
//! graduation_level = 15
//!
//! [scene]
//! village_template = "village"
//! village_group = "village/outside"
//!
//! [logging]
//! level = "info"
//! file = "training-ground.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::training::policy::DEFAULT_GRADUATION_LEVEL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Optional TSV roster; the bundled roster is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roster_file: Option<String>,
    /// Characters at or above this level no longer meet a master.
    #[serde(default = "default_graduation_level")]
    pub graduation_level: u32,
}

fn default_graduation_level() -> u32 {
    DEFAULT_GRADUATION_LEVEL
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            roster_file: None,
            graduation_level: DEFAULT_GRADUATION_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Template of the scenes that receive a yard on install.
    pub village_template: String,
    /// Connection group on the village the yard is attached to, when present.
    pub village_group: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            village_template: "village".to_string(),
            village_group: "village/outside".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("training-ground.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level, defaulting to `Info` for unknown values.
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.level.to_ascii_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => {
                eprintln!("Invalid log level '{}', defaulting to info", self.level);
                log::LevelFilter::Info
            }
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        if config.training.graduation_level == 0 {
            return Err(anyhow!(
                "Invalid config file {}: graduation_level must be at least 1",
                path
            ));
        }

        Ok(config)
    }

    /// Load configuration, using defaults only when the file does not exist.
    /// A file that exists but fails to read, parse or validate is an error.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        let exists = fs::try_exists(path)
            .await
            .map_err(|e| anyhow!("Failed to check config file {}: {}", path, e))?;
        if !exists {
            log::warn!("Config file {} not found, using default configuration", path);
            return Ok(Config::default());
        }
        Config::load(path).await
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            training: TrainingConfig::default(),
            scene: SceneConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_graduation_level() {
        let config = Config::default();
        assert_eq!(config.training.graduation_level, 15);
        assert!(config.training.roster_file.is_none());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[training]\ngraduation_level = 10\n").unwrap();
        assert_eq!(config.training.graduation_level, 10);
        assert_eq!(config.scene.village_template, "village");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_level_filter_parsing() {
        let cases = vec![
            ("debug", log::LevelFilter::Debug),
            ("WARN", log::LevelFilter::Warn),
            ("nonsense", log::LevelFilter::Info),
        ];
        for (level, expected) in cases {
            let cfg = LoggingConfig {
                level: level.to_string(),
                file: None,
            };
            assert_eq!(cfg.level_filter(), expected, "level {}", level);
        }
    }

    #[tokio::test]
    async fn test_create_default_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("training.toml");
        let path = path.to_str().unwrap();
        Config::create_default(path).await.unwrap();
        let loaded = Config::load(path).await.unwrap();
        assert_eq!(loaded.training.graduation_level, 15);
        assert_eq!(loaded.scene.village_group, "village/outside");
    }

    #[tokio::test]
    async fn test_zero_graduation_level_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[training]\ngraduation_level = 0\n").unwrap();
        let err = Config::load(path.to_str().unwrap()).await.unwrap_err();
        assert!(err.to_string().contains("graduation_level"));
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load_or_default(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.training.graduation_level, 15);
    }

    #[tokio::test]
    async fn test_invalid_file_is_not_replaced_by_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let bad_level = dir.path().join("bad.toml");
        std::fs::write(&bad_level, "[training]\ngraduation_level = 0\n").unwrap();
        assert!(Config::load_or_default(bad_level.to_str().unwrap()).await.is_err());

        let bad_syntax = dir.path().join("broken.toml");
        std::fs::write(&bad_syntax, "[training\n").unwrap();
        let err = Config::load_or_default(bad_syntax.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
