use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tenant id cannot be empty {location}")]
    EmptyTenantId { location: ErrorLocation },

    #[error("Invalid proxy port '{value}' for tenant {tenant_id} {location}")]
    InvalidProxyPort {
        tenant_id: String,
        value: String,
        location: ErrorLocation,
    },

    #[error("Port {port} for tenant {tenant_id} is out of range {location}")]
    PortOutOfRange {
        tenant_id: String,
        port: u32,
        location: ErrorLocation,
    },

    #[error("Topic template '{template}' has no {placeholder} placeholder {location}")]
    InvalidTopicTemplate {
        template: String,
        placeholder: &'static str,
        location: ErrorLocation,
    },

    #[error("Tenant {tenant_id} already has a route {location}")]
    DuplicateRoute {
        tenant_id: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
