use crate::{BroadcastFrame, ClientCounter, ConnectionId};

use std::sync::Arc;

use axum::extract::ws::Utf8Bytes;
use dz_core::{BroadcastSink, Metrics, Tenant, TenantId};
use log::{debug, error, info};
use serde_json::Value;
use tokio::sync::broadcast;

/// Broadcast side of one tenant: its port, its clients and its channel.
///
/// Clones share the same channel and counter.
#[derive(Clone)]
pub struct TenantEndpoint {
    inner: Arc<EndpointInner>,
}

struct EndpointInner {
    tenant_id: TenantId,
    port: u16,
    clients: ClientCounter,
    sender: broadcast::Sender<Utf8Bytes>,
    metrics: Metrics,
}

impl TenantEndpoint {
    pub fn new(tenant: &Tenant, channel_capacity: usize, metrics: Metrics) -> Self {
        let (sender, _) = broadcast::channel(channel_capacity.max(1));
        info!(
            "Created broadcast endpoint for demozone {} on port {}",
            tenant.id, tenant.port
        );

        Self {
            inner: Arc::new(EndpointInner {
                tenant_id: tenant.id.clone(),
                port: tenant.port,
                clients: ClientCounter::new(),
                sender,
                metrics,
            }),
        }
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.inner.tenant_id
    }

    pub fn port(&self) -> u16 {
        self.inner.port
    }

    /// Receiver for the frames emitted on this endpoint
    pub fn subscribe(&self) -> broadcast::Receiver<Utf8Bytes> {
        self.inner.sender.subscribe()
    }

    /// Account for a new client. Returns the new count.
    pub fn client_connected(&self, connection_id: ConnectionId) -> usize {
        let active = self.inner.clients.connected();
        info!(
            "Client {} connected to demozone {} ({} connected)",
            connection_id, self.inner.tenant_id, active
        );
        self.inner
            .metrics
            .client_connected(&self.inner.tenant_id, active);
        active
    }

    /// Account for a departed client. Returns the remaining count.
    pub fn client_disconnected(&self, connection_id: ConnectionId) -> usize {
        let active = self.inner.clients.disconnected();
        info!(
            "Client {} disconnected from demozone {} ({} remaining)",
            connection_id, self.inner.tenant_id, active
        );
        self.inner
            .metrics
            .client_disconnected(&self.inner.tenant_id, active);
        active
    }
}

impl BroadcastSink for TenantEndpoint {
    fn client_count(&self) -> usize {
        self.inner.clients.get()
    }

    fn emit(&self, event_name: &str, payload: &Value) {
        let frame = match BroadcastFrame::new(event_name, payload).encode() {
            Ok(frame) => frame,
            Err(e) => {
                error!(
                    "Dropping '{}' for demozone {}: {}",
                    event_name, self.inner.tenant_id, e
                );
                return;
            }
        };

        // Fire-and-forget: no receivers is not an error
        let receivers = self.inner.sender.send(frame).unwrap_or(0);
        debug!(
            "Emitted '{}' to demozone {} ({} receivers)",
            event_name, self.inner.tenant_id, receivers
        );
        self.inner
            .metrics
            .event_emitted(&self.inner.tenant_id, receivers);
    }
}
