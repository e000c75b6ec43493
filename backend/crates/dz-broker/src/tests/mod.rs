mod decode;

use crate::{BrokerConnectionManager, BrokerCoordinates, BrokerHandle, InMemoryBroker};

use std::sync::Arc;

pub(crate) const BOOTSTRAP: &str = "zk.test:2181";

/// Connect a manager over `broker` and return the live handle
pub(crate) async fn connected(broker: &InMemoryBroker) -> BrokerHandle {
    BrokerConnectionManager::new(Arc::new(broker.clone()))
        .connect(&BrokerCoordinates::new(BOOTSTRAP))
        .await
        .unwrap()
}
