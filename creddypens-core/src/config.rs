use std::path::PathBuf;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::org::{OrgContext, ORG_ID_ENV};

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CreddyConfig {
    /// Active organization id. Absent means signed out.
    #[serde(default)]
    pub org_id: Option<String>,

    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub chat: ChatConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json_format: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    #[serde(default = "default_output_format")]
    pub output_format: String,

    #[serde(default)]
    pub web_search: bool,

    #[serde(default)]
    pub deep_research: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    #[serde(default)]
    pub sidebar_collapsed: bool,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8010".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_connect_timeout() -> u64 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_format() -> String {
    "text".to_string()
}

fn default_tick_rate() -> u64 {
    50
}

fn default_refresh_interval() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_ms: default_connect_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            web_search: false,
            deep_research: false,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            refresh_interval_secs: default_refresh_interval(),
            sidebar_collapsed: false,
        }
    }
}

impl CreddyConfig {
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from_paths(get_config_paths())
    }

    pub fn load_from_paths(paths: Vec<PathBuf>) -> Result<Self, ConfigLoadError> {
        load_dotenv_files();

        let mut builder = ConfigBuilder::builder();

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CREDDYPENS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut creddy_config: CreddyConfig = config.try_deserialize().unwrap_or_default();

        // Direct env overrides take precedence over files.
        if let Ok(url) = std::env::var("CREDDYPENS_API_URL") {
            creddy_config.api.base_url = url;
        }
        if let Ok(org) = std::env::var(ORG_ID_ENV) {
            creddy_config.org_id = Some(org);
        }
        if let Ok(level) = std::env::var("CREDDYPENS_LOG_LEVEL") {
            creddy_config.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            creddy_config.logging.level = level;
        }

        creddy_config.validate()?;

        Ok(creddy_config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigLoadError::InvalidValue {
                key: "api.base_url".to_string(),
                message: "Must not be empty".to_string(),
            });
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigLoadError::InvalidValue {
                key: "api.base_url".to_string(),
                message: "Must be an http:// or https:// URL".to_string(),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigLoadError::InvalidValue {
                key: "api.timeout_secs".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level_lower = self.logging.level.to_lowercase();
        if !valid_levels.contains(&level_lower.as_str()) && !level_lower.contains('=') {
            return Err(ConfigLoadError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Must be one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    /// The organization context resolved from this configuration.
    pub fn org_context(&self) -> OrgContext {
        OrgContext::from_option(self.org_id.clone())
    }

    /// Persist the organization id to the user config file so later
    /// invocations start signed in. Used by `creddypens login`.
    pub fn save_org_id(org_id: &str) -> Result<PathBuf, ConfigLoadError> {
        let dir = ensure_config_dir()?;
        let path = dir.join("config.toml");

        let mut current = if path.exists() {
            std::fs::read_to_string(&path)
                .ok()
                .and_then(|s| toml::from_str::<CreddyConfig>(&s).ok())
                .unwrap_or_default()
        } else {
            CreddyConfig::default()
        };
        current.org_id = Some(org_id.to_string());

        let serialized = toml::to_string_pretty(&current).map_err(|e| {
            ConfigLoadError::InvalidValue {
                key: "config".to_string(),
                message: e.to_string(),
            }
        })?;
        std::fs::write(&path, serialized)?;
        Ok(path)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("creddypens.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("creddypens").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".creddypens").join("config.toml"));
    }

    paths
}

fn load_dotenv_files() {
    if let Ok(cwd) = std::env::current_dir() {
        for name in [".env", ".env.local"] {
            let path = cwd.join(name);
            if path.exists() {
                let _ = dotenvy::from_path(&path);
            }
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("creddypens"))
}

pub fn ensure_config_dir() -> Result<PathBuf, std::io::Error> {
    let config_dir = get_config_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine config directory",
        )
    })?;

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CreddyConfig::default();

        assert_eq!(config.api.base_url, "http://127.0.0.1:8010");
        assert_eq!(config.api.timeout_secs, 120);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert_eq!(config.chat.output_format, "text");
        assert!(!config.chat.web_search);
        assert_eq!(config.tui.tick_rate_ms, 50);
        assert!(config.org_id.is_none());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = CreddyConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let mut config = CreddyConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = CreddyConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = CreddyConfig::default();
        config.logging.level = "shout".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_complex_log_level() {
        let mut config = CreddyConfig::default();
        config.logging.level = "creddypens_core=debug,reqwest=warn".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_org_context_from_config() {
        let mut config = CreddyConfig::default();
        assert!(!config.org_context().is_authenticated());

        config.org_id = Some("org_test".to_string());
        assert_eq!(config.org_context().org_id(), Some("org_test"));
    }

    #[test]
    fn test_config_roundtrip_toml() {
        let mut config = CreddyConfig::default();
        config.org_id = Some("org_rt".to_string());
        let s = toml::to_string_pretty(&config).unwrap();
        let parsed: CreddyConfig = toml::from_str(&s).unwrap();
        assert_eq!(parsed.org_id.as_deref(), Some("org_rt"));
        assert_eq!(parsed.api.base_url, config.api.base_url);
    }
}
