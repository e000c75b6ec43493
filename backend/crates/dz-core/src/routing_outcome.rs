use crate::TenantId;

use std::fmt;

/// Required message field found missing during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Payload,
    Demozone,
    Eventname,
}

impl MissingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payload => "payload",
            Self::Demozone => "demozone",
            Self::Eventname => "eventname",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision taken by the router for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingOutcome {
    Delivered(TenantId),
    DroppedInvalid(MissingField),
    DroppedUnknownTenant(TenantId),
    DroppedNoClients(TenantId),
}

impl RoutingOutcome {
    /// Stable label used in metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Delivered(_) => "delivered",
            Self::DroppedInvalid(_) => "dropped_invalid",
            Self::DroppedUnknownTenant(_) => "dropped_unknown_tenant",
            Self::DroppedNoClients(_) => "dropped_no_clients",
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}
