use dz_broker::BrokerClient;

use std::sync::Arc;

/// Broker client the binary was built with.
#[cfg(feature = "kafka")]
pub fn default_broker_client() -> Arc<dyn BrokerClient> {
    Arc::new(dz_broker::KafkaBroker::new())
}

/// Broker client the binary was built with.
#[cfg(not(feature = "kafka"))]
pub fn default_broker_client() -> Arc<dyn BrokerClient> {
    Arc::new(unavailable::UnavailableBroker)
}

#[cfg(not(feature = "kafka"))]
mod unavailable {
    use dz_broker::{
        BrokerClient, BrokerCoordinates, BrokerError, BrokerResult, ConnectionState,
        SubscriptionEvent,
    };

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    const NO_BACKEND: &str = "no broker backend compiled in (build with --features kafka)";

    /// Stand-in that fails at the connect step
    pub(super) struct UnavailableBroker;

    #[async_trait]
    impl BrokerClient for UnavailableBroker {
        async fn connect(
            &self,
            _coordinates: &BrokerCoordinates,
            _states: mpsc::UnboundedSender<ConnectionState>,
        ) -> BrokerResult<()> {
            Err(BrokerError::client(NO_BACKEND))
        }

        async fn subscribe(
            &self,
            _topic: &str,
        ) -> BrokerResult<mpsc::Receiver<SubscriptionEvent>> {
            Err(BrokerError::client(NO_BACKEND))
        }

        async fn close(&self) {}
    }
}
