use crate::config::{ConfigError, ConfigResult, LogLevel};
use crate::store::DuplicateIdPolicy;

use std::path::Path;
use std::time::Duration;

use log::info;
use reqwest::Url;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Collection endpoint returning a JSON array of user records.
    pub endpoint: String,
    /// Whole-request timeout. Unset means the transport's own behaviour.
    pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(DEFAULT_ENDPOINT),
            timeout_secs: None,
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::invalid("remote.endpoint", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "remote.endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::invalid(
                "remote.timeout_secs",
                "must be greater than zero when set",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub duplicate_ids: DuplicateIdPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub colored: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            colored: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Built-in defaults
    /// 2. `path`, when given and present on disk
    /// 3. ROSTER_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) if path.exists() => Self::load_toml(path)?,
            _ => Config::default(),
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.remote.validate()
    }

    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  remote: {}", self.remote.endpoint);
        match self.remote.timeout_secs {
            Some(secs) => info!("  timeout: {secs}s"),
            None => info!("  timeout: none"),
        }
        info!("  duplicate ids: {:?}", self.store.duplicate_ids);
        info!("  log level: {:?}", *self.logging.level);
    }

    fn apply_env_overrides(&mut self) {
        Self::apply_env_string("ROSTER_ENDPOINT", &mut self.remote.endpoint);
        Self::apply_env_parse("ROSTER_DUPLICATE_IDS", &mut self.store.duplicate_ids);
        Self::apply_env_parse("ROSTER_LOG_LEVEL", &mut self.logging.level);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name) {
            if let Ok(parsed) = val.parse() {
                *target = parsed;
            }
        }
    }
}
