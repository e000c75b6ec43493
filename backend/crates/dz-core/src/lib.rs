pub mod broadcast_sink;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod relay_message;
pub mod router;
pub mod routing_outcome;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod tenant;
pub mod tenant_id;
pub mod topic_template;

#[cfg(test)]
mod tests;

pub use broadcast_sink::BroadcastSink;
pub use dispatcher::{Dispatcher, RouteSender, route_channel};
pub use error::{CoreError, Result as CoreResult};
pub use metrics::Metrics;
pub use relay_message::RelayMessage;
pub use router::Router;
pub use routing_outcome::{MissingField, RoutingOutcome};
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use tenant::{Tenant, compute_port};
pub use tenant_id::TenantId;
pub use topic_template::TopicTemplate;

/// Fixed offset added to a tenant's proxy port to obtain its endpoint port.
pub const BASE_PORT_OFFSET: u16 = 10300;

/// Placeholder substituted by the lowercased tenant id in topic templates.
pub const DEMOZONE_PLACEHOLDER: &str = "{demozone}";

/// Default capacity of the queue feeding the router.
pub const DEFAULT_ROUTE_QUEUE_CAPACITY: usize = 1024;
