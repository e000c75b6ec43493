use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Failed to bind {addr} for demozone {tenant_id}: {source} {location}")]
    Bind {
        tenant_id: String,
        addr: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Endpoint for demozone {tenant_id} stopped: {source} {location}")]
    Serve {
        tenant_id: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Heartbeat timeout after {timeout_ms}ms {location}")]
    HeartbeatTimeout {
        timeout_ms: u64,
        location: ErrorLocation,
    },

    #[error("Frame encode failed: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl WsError {
    #[track_caller]
    pub fn connection_closed<S: Into<String>>(reason: S) -> Self {
        Self::ConnectionClosed {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
