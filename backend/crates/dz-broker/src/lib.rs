pub mod broker_client;
pub mod broker_coordinates;
pub mod broker_handle;
pub mod connection_manager;
pub mod connection_state;
pub mod decode;
pub mod error;
pub mod in_memory;
#[cfg(feature = "kafka")]
pub mod kafka;
pub mod subscription_event;
pub mod tenant_consumer;

#[cfg(test)]
mod tests;

pub use broker_client::BrokerClient;
pub use broker_coordinates::BrokerCoordinates;
pub use broker_handle::BrokerHandle;
pub use connection_manager::BrokerConnectionManager;
pub use connection_state::ConnectionState;
pub use decode::decode_record;
pub use error::{BrokerError, Result as BrokerResult};
pub use in_memory::InMemoryBroker;
#[cfg(feature = "kafka")]
pub use kafka::KafkaBroker;
pub use subscription_event::{BrokerRecord, SubscriptionEvent};
pub use tenant_consumer::{TenantConsumer, subscribe_all};

/// Every tenant topic is consumed from this partition only.
pub const TENANT_PARTITION: i32 = 0;

/// Buffer between a broker subscription and its consumer task.
pub const SUBSCRIPTION_BUFFER: usize = 256;
