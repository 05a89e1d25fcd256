//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ClientConfig;
use crate::format::{Locale, UnknownLocale};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Rooms API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// HTTP client settings derived from this section
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    Locale::PtBr.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}

impl DisplayConfig {
    /// Parsed locale
    pub fn locale(&self) -> Result<Locale, UnknownLocale> {
        self.locale.parse()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// A config file that exists but cannot be read or parsed is an error,
    /// not a silent fallback to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("qa-rooms").join("config.toml")),
            Some(PathBuf::from("./qa-rooms.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing file of `paths`, or environment-only config
    fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::debug!("Using default config with environment overrides");
                Ok(Self::from_env())
            }
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(url) = var("QA_ROOMS_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("QA_ROOMS_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        // Display overrides
        if let Some(locale) = var("QA_ROOMS_LOCALE") {
            self.display.locale = locale;
        }

        // Logging overrides
        if let Some(level) = var("QA_ROOMS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("QA_ROOMS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# QA Rooms Configuration
#
# Environment variables override these settings:
# - QA_ROOMS_API_URL
# - QA_ROOMS_TIMEOUT_SECS
# - QA_ROOMS_LOCALE
# - QA_ROOMS_LOG_LEVEL
# - QA_ROOMS_LOG_FORMAT

[api]
# Rooms API base URL
base_url = "http://localhost:3333"

# Request timeout in seconds
request_timeout_secs = 10

[display]
# Locale for labels and relative dates: pt-BR or en
locale = "pt-BR"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
