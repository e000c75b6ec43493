use crate::{ConnectionConfig, ConnectionId, TenantEndpoint, WsError, WsResult};

use std::fmt::Display;
use std::future::pending;
use std::panic::Location;

use axum::body::Bytes;
use axum::extract::ws::Message;
use dz_core::ShutdownGuard;
use error_location::ErrorLocation;
use futures::{Sink, SinkExt, Stream, StreamExt};
use log::{debug, error, info, warn};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, interval_at, sleep_until};

/// One client session on a tenant endpoint
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    endpoint: TenantEndpoint,
    config: ConnectionConfig,
}

impl WebSocketConnection {
    pub fn new(endpoint: TenantEndpoint, config: ConnectionConfig) -> Self {
        Self {
            connection_id: ConnectionId::new(),
            endpoint,
            config,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Run the session until the client leaves, misses its heartbeat, fails,
    /// or shutdown is signalled.
    ///
    /// The client is counted on entry and discounted exactly once on exit,
    /// whatever ended the session.
    pub async fn handle<S, R, E>(
        self,
        mut ws_sender: S,
        mut ws_receiver: R,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsResult<()>
    where
        S: Sink<Message> + Unpin + Send + 'static,
        R: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        let tenant_id = self.endpoint.tenant_id().clone();
        // Subscribe before counting: once counted, every emission must reach this client
        let mut broadcast_rx = self.endpoint.subscribe();
        self.endpoint.client_connected(self.connection_id);

        // Bounded channel for outgoing messages (backpressure handling)
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size.max(1));

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let ping_interval = self.config.ping_interval;
        let mut ping = interval_at(Instant::now() + ping_interval, ping_interval);
        let mut pong_deadline: Option<Instant> = None;

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Pong(_))) => {
                            debug!("Heartbeat from connection {} (demozone {})", self.connection_id, tenant_id);
                            pong_deadline = None;
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            info!("Connection {} closed by client", self.connection_id);
                            break Ok(());
                        }
                        Some(Ok(_)) => {
                            // Clients only listen; pings are answered by the transport
                            debug!("Ignoring frame from connection {}", self.connection_id);
                        }
                        Some(Err(e)) => {
                            error!("WebSocket error on connection {}: {}", self.connection_id, e);
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                    }
                }

                frame = broadcast_rx.recv() => {
                    match frame {
                        Ok(text) => {
                            if tx.try_send(Message::Text(text)).is_err() {
                                warn!("Send buffer full on connection {}, frame dropped", self.connection_id);
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            warn!("Connection {} lagged, missed {} frames", self.connection_id, missed);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            info!("Broadcast channel closed for connection {}", self.connection_id);
                            break Ok(());
                        }
                    }
                }

                _ = ping.tick() => {
                    if pong_deadline.is_none() {
                        pong_deadline = Some(Instant::now() + self.config.ping_timeout);
                    }
                    if tx.send(Message::Ping(Bytes::new())).await.is_err() {
                        break Err(WsError::connection_closed("send task ended"));
                    }
                }

                _ = wait_until(pong_deadline) => {
                    let timeout_ms = self.config.ping_timeout.as_millis() as u64;
                    warn!(
                        "Connection {} missed its heartbeat ({}ms), disconnecting",
                        self.connection_id, timeout_ms
                    );
                    let _ = tx.try_send(Message::Close(None));
                    break Err(WsError::HeartbeatTimeout {
                        timeout_ms,
                        location: ErrorLocation::from(Location::caller()),
                    });
                }

                _ = shutdown_guard.wait() => {
                    info!("Shutting down connection {} gracefully", self.connection_id);
                    let _ = tx.try_send(Message::Close(None));
                    break Ok(());
                }
            }
        };

        // Cleanup
        drop(tx);
        let _ = send_task.await;
        self.endpoint.client_disconnected(self.connection_id);

        result
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => pending().await,
    }
}
