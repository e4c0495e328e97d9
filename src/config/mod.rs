//! Configuration: TOML file plus `ROSTER_*` environment overrides.

mod config;
mod error;
mod log_level;

pub use config::{Config, LoggingConfig, RemoteConfig, StoreConfig, DEFAULT_ENDPOINT};
pub use error::{ConfigError, Result as ConfigResult};
pub use log_level::LogLevel;

#[cfg(test)]
mod tests;
