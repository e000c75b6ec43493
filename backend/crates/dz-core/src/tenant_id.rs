use crate::{CoreError, CoreResult};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;

/// Canonical (upper case) demozone identifier.
///
/// Ids compare case-insensitively because every constructor normalizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TenantId(String);

impl TenantId {
    /// Parse a tenant id coming from the registry. Empty ids are rejected.
    #[track_caller]
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.trim().is_empty() {
            return Err(CoreError::EmptyTenantId {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self::normalize(raw))
    }

    /// Normalize an id taken from an inbound message.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used in broker topic names.
    pub fn topic_segment(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
