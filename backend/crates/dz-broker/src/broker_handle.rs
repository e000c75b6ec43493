use crate::{BrokerClient, BrokerError, BrokerResult, ConnectionState, SubscriptionEvent};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;
use tokio::sync::{mpsc, watch};

/// Shared handle on an established broker connection
#[derive(Clone)]
pub struct BrokerHandle {
    client: Arc<dyn BrokerClient>,
    state_rx: watch::Receiver<ConnectionState>,
    closed: Arc<AtomicBool>,
    bootstrap: Arc<str>,
}

impl BrokerHandle {
    pub(crate) fn new(
        client: Arc<dyn BrokerClient>,
        state_rx: watch::Receiver<ConnectionState>,
        bootstrap: String,
    ) -> Self {
        Self {
            client,
            state_rx,
            closed: Arc::new(AtomicBool::new(false)),
            bootstrap: Arc::from(bootstrap),
        }
    }

    /// Latest state reported by the client
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Receiver notified on every state change
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    pub fn bootstrap(&self) -> &str {
        &self.bootstrap
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub async fn subscribe(&self, topic: &str) -> BrokerResult<mpsc::Receiver<SubscriptionEvent>> {
        if self.is_closed() {
            return Err(BrokerError::closed());
        }
        self.client.subscribe(topic).await
    }

    /// Close the connection. Safe to call more than once.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.client.close().await;
        info!("Broker connection to {} closed", self.bootstrap);
    }
}
