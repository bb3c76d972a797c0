//! Configuration management
//!
//! YAML-based configuration with:
//! - Environment variable overrides
//! - Multiple configuration file locations
//! - Default values for all settings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::services::node_status::{NodeStatusResolver, DEFAULT_UNREPORTED_HOURS};

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InspectConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Log output target (console or file)
    #[serde(default = "default_log_target")]
    pub target: LogTarget,
    /// Directory for log files (used when target is "file")
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "default_log_prefix")]
    pub log_prefix: String,
    #[serde(default = "default_log_rotation")]
    pub daily_rotation: bool,
}

/// Log output target
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    Console,
    File,
    Both,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_log_target() -> LogTarget {
    LogTarget::Console
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("/var/log/openvox/pdb-inspect")
}

fn default_log_prefix() -> String {
    "pdb-inspect".to_string()
}

fn default_log_rotation() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            target: default_log_target(),
            log_dir: default_log_dir(),
            log_prefix: default_log_prefix(),
            daily_rotation: default_log_rotation(),
        }
    }
}

/// Node status derivation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusConfig {
    /// Hours without a report before a node counts as unreported
    #[serde(default = "default_unreported_hours")]
    pub unreported_hours: u32,
}

fn default_unreported_hours() -> u32 {
    DEFAULT_UNREPORTED_HOURS
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            unreported_hours: default_unreported_hours(),
        }
    }
}

impl StatusConfig {
    pub fn resolver(&self) -> NodeStatusResolver {
        NodeStatusResolver::from_hours(self.unreported_hours)
    }
}

impl InspectConfig {
    /// Load configuration from `OPENVOX_PDB_CONFIG` or a standard location,
    /// falling back to defaults, then apply environment overrides
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("OPENVOX_PDB_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(Self::find_config_file);

        let mut config = match config_path {
            Some(ref path) if path.exists() => Self::from_file(path)?,
            _ => InspectConfig::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit path, then apply environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Find configuration file in standard locations
    pub fn find_config_file() -> Option<PathBuf> {
        let paths = [
            PathBuf::from("pdb-inspect.yaml"),
            PathBuf::from("config/pdb-inspect.yaml"),
            PathBuf::from("/etc/openvox-webui/pdb-inspect.yaml"),
            dirs::config_dir()
                .map(|p| p.join("openvox-webui/pdb-inspect.yaml"))
                .unwrap_or_default(),
        ];

        paths.into_iter().find(|p| p.exists())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("OPENVOX_LOG_FORMAT") {
            self.logging.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }
        if let Ok(hours) = std::env::var("OPENVOX_UNREPORTED_HOURS") {
            if let Ok(h) = hours.parse() {
                self.status.unreported_hours = h;
            }
        }
    }
}
