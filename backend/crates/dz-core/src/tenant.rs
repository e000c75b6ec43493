use crate::{BASE_PORT_OFFSET, CoreError, CoreResult, TenantId, TopicTemplate};

use std::panic::Location;

use error_location::ErrorLocation;

/// One isolated demo environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    pub id: TenantId,
    /// Display name
    pub name: String,
    /// Port of the tenant's broadcast endpoint
    pub port: u16,
}

impl Tenant {
    pub fn new(id: TenantId, name: impl Into<String>, port: u16) -> Self {
        Self {
            id,
            name: name.into(),
            port,
        }
    }

    /// Broker topic this tenant consumes from.
    pub fn topic(&self, template: &TopicTemplate) -> String {
        template.render(&self.id)
    }
}

/// Compute the endpoint port for a tenant: `BASE_PORT_OFFSET + proxy_port`.
///
/// `proxy_port` must be a plain non-negative integer (surrounding whitespace
/// is tolerated).
#[track_caller]
pub fn compute_port(tenant_id: &str, proxy_port: &str) -> CoreResult<u16> {
    let caller = Location::caller();
    let trimmed = proxy_port.trim();

    let offset = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| trimmed.parse::<u32>().ok())
        .flatten()
        .ok_or_else(|| CoreError::InvalidProxyPort {
            tenant_id: tenant_id.to_string(),
            value: proxy_port.to_string(),
            location: ErrorLocation::from(caller),
        })?;

    let port = u32::from(BASE_PORT_OFFSET).saturating_add(offset);
    u16::try_from(port).map_err(|_| CoreError::PortOutOfRange {
        tenant_id: tenant_id.to_string(),
        port,
        location: ErrorLocation::from(caller),
    })
}
