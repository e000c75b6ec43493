use std::panic::Location;

use dz_config::ConfigError;
use dz_core::CoreError;
use error_location::ErrorLocation;
use thiserror::Error;

/// Errors raised while fetching setup data or building the tenant registry
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("HTTP request to {url} failed: {message} {location}")]
    Http {
        url: String,
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Setup server answered {status} for {url} {location}")]
    Status {
        url: String,
        status: u16,
        location: ErrorLocation,
    },

    #[error("Malformed response from {url}: {message} {location}")]
    Json {
        url: String,
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Setup server returned no demozones {location}")]
    NoTenants { location: ErrorLocation },

    #[error("Demozones {first} and {second} both map to port {port} {location}")]
    PortCollision {
        first: String,
        second: String,
        port: u16,
        location: ErrorLocation,
    },

    #[error("Demozone {tenant_id} is listed more than once {location}")]
    DuplicateTenant {
        tenant_id: String,
        location: ErrorLocation,
    },

    #[error("Setup configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid demozone entry: {source}")]
    Tenant {
        #[from]
        source: CoreError,
    },
}

impl SetupError {
    #[track_caller]
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        SetupError::Http {
            url: url.to_string(),
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn from_json(url: &str, err: serde_json::Error) -> Self {
        SetupError::Json {
            url: url.to_string(),
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn status(url: &str, status: u16) -> Self {
        SetupError::Status {
            url: url.to_string(),
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;
