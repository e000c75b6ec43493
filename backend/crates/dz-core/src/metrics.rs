use crate::{RoutingOutcome, TenantId};

use metrics::{counter, gauge};

/// Metrics collector for relay operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "dz_relay" }
    }

    /// Record the outcome of one routing decision
    pub fn message_routed(&self, outcome: &RoutingOutcome) {
        counter!(format!("{}.messages.routed", self.prefix)).increment(1);
        counter!(format!("{}.messages.{}", self.prefix, outcome.kind())).increment(1);
    }

    /// Record a broker record that could not be decoded
    pub fn decode_failed(&self, tenant_id: &TenantId) {
        counter!(
            format!("{}.records.decode_failed", self.prefix),
            "tenant" => tenant_id.to_string()
        )
        .increment(1);
    }

    /// Record a client joining a tenant endpoint
    pub fn client_connected(&self, tenant_id: &TenantId, active: usize) {
        counter!(
            format!("{}.clients.connected", self.prefix),
            "tenant" => tenant_id.to_string()
        )
        .increment(1);
        gauge!(
            format!("{}.clients.active", self.prefix),
            "tenant" => tenant_id.to_string()
        )
        .set(active as f64);
    }

    /// Record a client leaving a tenant endpoint
    pub fn client_disconnected(&self, tenant_id: &TenantId, active: usize) {
        counter!(
            format!("{}.clients.disconnected", self.prefix),
            "tenant" => tenant_id.to_string()
        )
        .increment(1);
        gauge!(
            format!("{}.clients.active", self.prefix),
            "tenant" => tenant_id.to_string()
        )
        .set(active as f64);
    }

    /// Record an emission on a tenant endpoint
    pub fn event_emitted(&self, tenant_id: &TenantId, receivers: usize) {
        counter!(
            format!("{}.events.emitted", self.prefix),
            "tenant" => tenant_id.to_string()
        )
        .increment(1);
        gauge!(
            format!("{}.events.receivers", self.prefix),
            "tenant" => tenant_id.to_string()
        )
        .set(receivers as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
