//! Configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line arguments and environment variables (collected by the binary)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! The TOML file is optional. An explicitly requested file must exist and
//! parse; the per-user default file is only read when present.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_LOG_FILE: &str = "roster-service.log";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Config file contents; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Directory holding guild dumps
    #[serde(default)]
    pub dump_dir: Option<PathBuf>,

    #[serde(default)]
    pub bind_address: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    /// Largest accepted dump upload
    #[serde(default)]
    pub max_upload_bytes: Option<usize>,

    #[serde(default)]
    pub logging: TomlLogging,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlLogging {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,

    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Set to false to log to stderr only
    #[serde(default)]
    pub to_file: Option<bool>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file, `None` when logging to stderr only
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line and environment overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub dump_dir: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub dump_dir: PathBuf,
    pub bind_address: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub logging: LoggingConfig,
    /// Config file the settings were read from, if any
    pub source: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dump_dir: PathBuf::from("."),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            logging: LoggingConfig::default(),
            source: None,
        }
    }
}

impl ServiceConfig {
    /// Read the config file (if any) and apply overrides on top of it
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let (toml_config, source) = match overrides.config_path.as_deref() {
            Some(path) => (read_toml_config(path)?, Some(path.to_path_buf())),
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => (read_toml_config(&path)?, Some(path)),
                None => (TomlConfig::default(), None),
            },
        };

        let mut config = Self::resolve(overrides, toml_config);
        config.source = source;
        Ok(config)
    }

    /// Merge overrides, file settings and defaults
    pub fn resolve(overrides: ConfigOverrides, file: TomlConfig) -> Self {
        let defaults = Self::default();

        let to_file = file.logging.to_file.unwrap_or(true);
        let log_file = overrides.log_file.or(file.logging.file).or(defaults.logging.file);

        Self {
            dump_dir: overrides.dump_dir.or(file.dump_dir).unwrap_or(defaults.dump_dir),
            bind_address: overrides
                .bind_address
                .or(file.bind_address)
                .unwrap_or(defaults.bind_address),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            max_upload_bytes: file.max_upload_bytes.unwrap_or(defaults.max_upload_bytes),
            logging: LoggingConfig {
                level: overrides
                    .log_level
                    .or(file.logging.level)
                    .unwrap_or(defaults.logging.level),
                file: if to_file { log_file } else { None },
            },
            source: None,
        }
    }
}

/// Per-user config file location, e.g. `~/.config/roster-svc/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("roster-svc").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse TOML {:?}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::resolve(ConfigOverrides::default(), TomlConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.dump_dir, PathBuf::from("."));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, Some(PathBuf::from("roster-service.log")));
    }

    #[test]
    fn test_overrides_beat_file() {
        let file: TomlConfig = toml::from_str(
            r#"
            dump_dir = "/srv/dumps"
            port = 9000

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        let overrides = ConfigOverrides {
            port: Some(9100),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(overrides, file);
        assert_eq!(config.port, 9100);
        assert_eq!(config.dump_dir, PathBuf::from("/srv/dumps"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_file_logging_can_be_disabled() {
        let file: TomlConfig = toml::from_str("[logging]\nto_file = false\n").unwrap();
        let config = ServiceConfig::resolve(ConfigOverrides::default(), file);
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<TomlConfig>("prot = 1\n").is_err());
    }
}
