//! Remote loading of the user collection.

pub(crate) mod error;
pub(crate) mod loader;

pub use error::{LoadError, Result as LoadResult};
pub use loader::RemoteLoader;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;

    #[test]
    fn loader_uses_configured_endpoint() {
        let config = RemoteConfig {
            endpoint: "http://127.0.0.1:9/users".into(),
            ..RemoteConfig::default()
        };
        let loader = RemoteLoader::new(&config).unwrap();
        assert_eq!(loader.endpoint, "http://127.0.0.1:9/users");
    }

    #[test]
    fn status_error_names_the_url() {
        let err = LoadError::status(reqwest::StatusCode::NOT_FOUND, "http://x/users");
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("http://x/users"));
    }

    #[test]
    fn json_error_converts_with_message() {
        let parse = serde_json::from_str::<Vec<crate::User>>("{").unwrap_err();
        let err = LoadError::from(parse);
        assert!(matches!(err, LoadError::Json { .. }));
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
