use std::panic::Location;

use dz_core::CoreError;
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("Broker at {bootstrap} stopped reporting before it connected {location}")]
    NeverConnected {
        bootstrap: String,
        location: ErrorLocation,
    },

    #[error("Broker client error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },

    #[error("Subscription to {topic} failed: {message} {location}")]
    Subscribe {
        topic: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Broker connection is closed {location}")]
    Closed { location: ErrorLocation },

    #[error("Empty record {location}")]
    EmptyRecord { location: ErrorLocation },

    #[error("Record is not valid JSON: {source} {location}")]
    Decode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Invalid topic: {source}")]
    Topic {
        #[from]
        source: CoreError,
    },
}

impl BrokerError {
    #[track_caller]
    pub fn client<S: Into<String>>(message: S) -> Self {
        Self::Client {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn subscribe<S: Into<String>>(topic: &str, message: S) -> Self {
        Self::Subscribe {
            topic: topic.to_string(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn closed() -> Self {
        Self::Closed {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrokerError>;
