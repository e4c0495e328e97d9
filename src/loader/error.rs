use error_location::ErrorLocation;
use reqwest::StatusCode;
use std::panic::Location;
use thiserror::Error;

/// Errors that can occur while fetching the user collection
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} from {url} {location}")]
    Status {
        status: StatusCode,
        url: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        LoadError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        LoadError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn status(status: StatusCode, url: impl Into<String>) -> Self {
        LoadError::Status {
            status,
            url: url.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for LoadError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        LoadError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for LoadError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        LoadError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
