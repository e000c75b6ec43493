use crate::{RelayMessage, Router, ShutdownGuard};

use log::info;
use tokio::sync::mpsc;

/// Producer side of the router queue, shared by every message source.
pub type RouteSender = mpsc::Sender<RelayMessage>;

/// Create the bounded queue that feeds a [`Dispatcher`].
pub fn route_channel(capacity: usize) -> (RouteSender, mpsc::Receiver<RelayMessage>) {
    mpsc::channel(capacity)
}

/// Drains the router queue on a single task so that no two `route()` calls
/// interleave. Messages from one producer keep their send order.
pub struct Dispatcher {
    router: Router,
    receiver: mpsc::Receiver<RelayMessage>,
}

impl Dispatcher {
    pub fn new(router: Router, receiver: mpsc::Receiver<RelayMessage>) -> Self {
        Self { router, receiver }
    }

    /// Run until every sender is dropped or shutdown is signalled.
    /// Returns how many messages were routed.
    pub async fn run(mut self, mut shutdown_guard: ShutdownGuard) -> u64 {
        info!(
            "Router dispatching for {} tenant(s)",
            self.router.tenant_count()
        );

        let mut routed = 0u64;
        loop {
            tokio::select! {
                message = self.receiver.recv() => {
                    match message {
                        Some(message) => {
                            self.router.route(message);
                            routed += 1;
                        }
                        None => {
                            info!("Router queue closed");
                            break;
                        }
                    }
                }
                _ = shutdown_guard.wait() => {
                    info!("Router stopping on shutdown");
                    break;
                }
            }
        }

        routed
    }
}
