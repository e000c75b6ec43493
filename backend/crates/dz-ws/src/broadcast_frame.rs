use crate::{WsError, WsResult};

use std::panic::Location;

use axum::extract::ws::Utf8Bytes;
use error_location::ErrorLocation;
use serde::Serialize;
use serde_json::Value;

/// Wire form of one emission: `{"event": ..., "data": ...}`
#[derive(Debug, Serialize)]
pub struct BroadcastFrame<'a> {
    pub event: &'a str,
    pub data: &'a Value,
}

impl<'a> BroadcastFrame<'a> {
    pub fn new(event: &'a str, data: &'a Value) -> Self {
        Self { event, data }
    }

    /// Encode as the text of a WebSocket frame
    #[track_caller]
    pub fn encode(&self) -> WsResult<Utf8Bytes> {
        serde_json::to_string(self)
            .map(Utf8Bytes::from)
            .map_err(|source| WsError::Encode {
                source,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
