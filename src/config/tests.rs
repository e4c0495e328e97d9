use crate::config::{Config, ConfigError, LogLevel, DEFAULT_ENDPOINT};
use crate::store::DuplicateIdPolicy;

use std::env;
use std::io::Write;

use log::LevelFilter;
use serial_test::serial;
use tempfile::NamedTempFile;

/// RAII guard for environment variables - automatically restores on drop
struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let original = env::var(key).ok();
        env::set_var(key, value);
        Self { key, original }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.original {
            Some(val) => env::set_var(self.key, val),
            None => env::remove_var(self.key),
        }
    }
}

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn given_no_file_when_load_then_defaults() {
    let config = Config::load(None).unwrap();

    assert_eq!(config.remote.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.remote.timeout_secs, None);
    assert_eq!(config.store.duplicate_ids, DuplicateIdPolicy::Allow);
    assert_eq!(config.logging.level, LogLevel(LevelFilter::Info));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn given_missing_path_when_load_then_defaults() {
    let config = Config::load(Some(std::path::Path::new("/nonexistent/roster.toml"))).unwrap();
    assert_eq!(config.remote.endpoint, DEFAULT_ENDPOINT);
}

#[test]
#[serial]
fn given_toml_file_when_load_then_uses_file_values() {
    let file = toml_file(
        r#"
        [remote]
        endpoint = "http://localhost:3000/users"
        timeout_secs = 5

        [store]
        duplicate_ids = "skip"

        [logging]
        level = "debug"
        colored = false
        "#,
    );

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.remote.endpoint, "http://localhost:3000/users");
    assert_eq!(config.remote.timeout().map(|t| t.as_secs()), Some(5));
    assert_eq!(config.store.duplicate_ids, DuplicateIdPolicy::Skip);
    assert_eq!(*config.logging.level, LevelFilter::Debug);
    assert!(!config.logging.colored);
}

#[test]
#[serial]
fn given_partial_file_when_load_then_missing_sections_default() {
    let file = toml_file("[logging]\nlevel = \"warn\"\n");

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.remote.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(*config.logging.level, LevelFilter::Warn);
    assert!(config.logging.colored);
}

#[test]
#[serial]
fn given_unknown_log_level_when_load_then_info() {
    let file = toml_file("[logging]\nlevel = \"loud\"\n");
    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(*config.logging.level, LevelFilter::Info);
}

#[test]
#[serial]
fn given_malformed_toml_when_load_then_toml_error() {
    let file = toml_file("[remote\nendpoint = ");

    let result = Config::load(Some(file.path()));

    assert!(matches!(result, Err(ConfigError::Toml { .. })));
}

#[test]
#[serial]
fn given_env_overrides_when_load_then_env_wins() {
    let file = toml_file("[remote]\nendpoint = \"http://file/users\"\n");
    let _endpoint = EnvGuard::set("ROSTER_ENDPOINT", "http://env/users");
    let _policy = EnvGuard::set("ROSTER_DUPLICATE_IDS", "skip");
    let _level = EnvGuard::set("ROSTER_LOG_LEVEL", "trace");

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.remote.endpoint, "http://env/users");
    assert_eq!(config.store.duplicate_ids, DuplicateIdPolicy::Skip);
    assert_eq!(*config.logging.level, LevelFilter::Trace);
}

#[test]
#[serial]
fn given_unparseable_env_policy_when_load_then_ignored() {
    let _policy = EnvGuard::set("ROSTER_DUPLICATE_IDS", "sometimes");
    let config = Config::load(None).unwrap();
    assert_eq!(config.store.duplicate_ids, DuplicateIdPolicy::Allow);
}

#[test]
fn given_non_http_endpoint_when_validate_then_invalid() {
    let mut config = Config::default();
    config.remote.endpoint = "ftp://example.com/users".into();

    let err = config.validate().unwrap_err();

    assert!(matches!(err, ConfigError::Invalid { field: "remote.endpoint", .. }));
}

#[test]
fn given_relative_endpoint_when_validate_then_invalid() {
    let mut config = Config::default();
    config.remote.endpoint = "/users".into();
    assert!(config.validate().is_err());
}

#[test]
fn given_zero_timeout_when_validate_then_invalid() {
    let mut config = Config::default();
    config.remote.timeout_secs = Some(0);

    let err = config.validate().unwrap_err();

    assert!(err.to_string().contains("remote.timeout_secs"));
}
