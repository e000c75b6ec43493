use crate::{BrokerClient, BrokerCoordinates, BrokerError, BrokerHandle, BrokerResult, ConnectionState};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{error, info, warn};
use tokio::sync::{mpsc, watch};

/// Owns the single broker connection of the relay.
pub struct BrokerConnectionManager {
    client: Arc<dyn BrokerClient>,
}

impl BrokerConnectionManager {
    pub fn new(client: Arc<dyn BrokerClient>) -> Self {
        Self { client }
    }

    /// Connect and wait for the first `Connected` notification.
    ///
    /// Later transitions keep flowing into the returned handle's state.
    /// No retry here: if the client stops reporting before it ever connects,
    /// this fails.
    pub async fn connect(&self, coordinates: &BrokerCoordinates) -> BrokerResult<BrokerHandle> {
        let bootstrap = coordinates.bootstrap.clone();
        info!("Connecting to broker at {}", bootstrap);

        let (states_tx, mut states_rx) = mpsc::unbounded_channel();
        self.client.connect(coordinates, states_tx).await?;

        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);

        loop {
            match states_rx.recv().await {
                Some(state) => {
                    record_state(&state_tx, state, &bootstrap);
                    if state.is_usable() {
                        break;
                    }
                }
                None => {
                    return Err(BrokerError::NeverConnected {
                        bootstrap,
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        }

        tokio::spawn(track_states(states_rx, state_tx, bootstrap.clone()));

        Ok(BrokerHandle::new(
            Arc::clone(&self.client),
            state_rx,
            bootstrap,
        ))
    }
}

async fn track_states(
    mut states_rx: mpsc::UnboundedReceiver<ConnectionState>,
    state_tx: watch::Sender<ConnectionState>,
    bootstrap: String,
) {
    while let Some(state) = states_rx.recv().await {
        record_state(&state_tx, state, &bootstrap);
    }
}

/// Store `state` and log it, only when it differs from the current one.
pub(crate) fn record_state(
    state_tx: &watch::Sender<ConnectionState>,
    state: ConnectionState,
    bootstrap: &str,
) -> bool {
    let changed = state_tx.send_if_modified(|current| {
        if *current == state {
            return false;
        }
        *current = state;
        true
    });

    if changed {
        match state {
            ConnectionState::Connected => info!("Broker {} connected", bootstrap),
            ConnectionState::Disconnected => warn!("Broker {} disconnected", bootstrap),
            ConnectionState::Expired => error!("Broker {} session expired", bootstrap),
        }
    }

    changed
}
