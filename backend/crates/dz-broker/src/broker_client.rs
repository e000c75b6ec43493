use crate::{BrokerCoordinates, BrokerResult, ConnectionState, SubscriptionEvent};

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Capability surface of the external broker client.
///
/// Reconnection belongs to the implementation. It reports every state it
/// reaches on the channel handed to [`BrokerClient::connect`] and keeps
/// existing subscriptions flowing once it is connected again.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Start connecting. Must not wait for the connection to come up.
    async fn connect(
        &self,
        coordinates: &BrokerCoordinates,
        states: mpsc::UnboundedSender<ConnectionState>,
    ) -> BrokerResult<()>;

    /// Consume partition 0 of `topic`. The stream ends when the client closes.
    async fn subscribe(&self, topic: &str) -> BrokerResult<mpsc::Receiver<SubscriptionEvent>>;

    async fn close(&self);
}
