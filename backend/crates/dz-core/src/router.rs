use crate::relay_message::is_present;
use crate::{
    BroadcastSink, CoreError, CoreResult, Metrics, MissingField, RelayMessage, RoutingOutcome,
    TenantId,
};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, error};

/// Validates inbound messages and hands them to the owning tenant's endpoint.
pub struct Router {
    routes: HashMap<TenantId, Arc<dyn BroadcastSink>>,
    metrics: Metrics,
}

impl Router {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            routes: HashMap::new(),
            metrics,
        }
    }

    /// Attach a tenant's endpoint. Each tenant can be registered once.
    #[track_caller]
    pub fn register(&mut self, tenant_id: TenantId, sink: Arc<dyn BroadcastSink>) -> CoreResult<()> {
        if self.routes.contains_key(&tenant_id) {
            return Err(CoreError::DuplicateRoute {
                tenant_id: tenant_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.routes.insert(tenant_id, sink);
        Ok(())
    }

    pub fn tenant_count(&self) -> usize {
        self.routes.len()
    }

    /// Route one message. Checks run in a fixed order and stop at the first
    /// failure; every drop is logged once.
    pub fn route(&self, message: RelayMessage) -> RoutingOutcome {
        let outcome = self.resolve(message);
        self.metrics.message_routed(&outcome);
        outcome
    }

    fn resolve(&self, message: RelayMessage) -> RoutingOutcome {
        let Some(payload) = message.payload.filter(is_present) else {
            error!("Message does not contain 'payload'. Ignoring");
            return RoutingOutcome::DroppedInvalid(MissingField::Payload);
        };

        let Some(demozone) = message.demozone.filter(|d| !d.is_empty()) else {
            error!("Message does not contain 'demozone'. Ignoring");
            return RoutingOutcome::DroppedInvalid(MissingField::Demozone);
        };

        let tenant_id = TenantId::normalize(&demozone);
        let Some(sink) = self.routes.get(&tenant_id) else {
            error!("Incoming demozone '{}' not registered. Ignoring", tenant_id);
            return RoutingOutcome::DroppedUnknownTenant(tenant_id);
        };

        let Some(event_name) = message.eventname.filter(|e| !e.is_empty()) else {
            error!("Message does not contain 'eventname'. Ignoring");
            return RoutingOutcome::DroppedInvalid(MissingField::Eventname);
        };

        if sink.client_count() == 0 {
            debug!(
                "No clients connected for {}, skipping event '{}'",
                tenant_id, event_name
            );
            return RoutingOutcome::DroppedNoClients(tenant_id);
        }

        debug!("Sending event to {} ({}): {}", event_name, tenant_id, payload);
        sink.emit(&event_name, &payload);

        RoutingOutcome::Delivered(tenant_id)
    }
}
