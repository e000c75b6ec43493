use crate::{BrokerError, BrokerResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::Value;

/// Decode a raw record as JSON. Empty records and invalid UTF-8 are errors.
#[track_caller]
pub fn decode_record(bytes: &[u8]) -> BrokerResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(BrokerError::EmptyRecord {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    serde_json::from_slice(bytes).map_err(|source| BrokerError::Decode {
        source,
        location: ErrorLocation::from(Location::caller()),
    })
}
