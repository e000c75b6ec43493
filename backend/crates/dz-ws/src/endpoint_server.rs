use crate::{ConnectionConfig, EndpointConfig, TenantEndpoint, WebSocketConnection, WsError, WsResult};

use std::net::SocketAddr;
use std::panic::Location;

use axum::{
    Router,
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use dz_core::{Metrics, ShutdownCoordinator, Tenant};
use error_location::ErrorLocation;
use futures::StreamExt;
use log::{debug, info};
use tokio::net::TcpListener;

/// Shared state of one tenant's upgrade handler
#[derive(Clone)]
struct EndpointState {
    endpoint: TenantEndpoint,
    config: ConnectionConfig,
    shutdown: ShutdownCoordinator,
}

/// A tenant endpoint bound to its port, ready to serve.
pub struct EndpointServer {
    endpoint: TenantEndpoint,
    listener: TcpListener,
    local_addr: SocketAddr,
    path: String,
    connection: ConnectionConfig,
}

impl EndpointServer {
    /// Bind the endpoint's port on the configured host.
    pub async fn bind(endpoint: TenantEndpoint, config: &EndpointConfig) -> WsResult<Self> {
        let addr = config.bind_addr(endpoint.port());
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| WsError::Bind {
                tenant_id: endpoint.tenant_id().to_string(),
                addr: addr.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;
        let local_addr = listener.local_addr().map_err(|source| WsError::Bind {
            tenant_id: endpoint.tenant_id().to_string(),
            addr,
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(
            "Demozone {} listening on ws://{}{}",
            endpoint.tenant_id(),
            local_addr,
            config.path
        );

        Ok(Self {
            endpoint,
            listener,
            local_addr,
            path: config.path.clone(),
            connection: config.connection.clone(),
        })
    }

    pub fn endpoint(&self) -> &TenantEndpoint {
        &self.endpoint
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve upgrades until shutdown is signalled.
    pub async fn serve(self, shutdown: ShutdownCoordinator) -> WsResult<()> {
        let tenant_id = self.endpoint.tenant_id().to_string();
        let mut shutdown_guard = shutdown.subscribe_guard();
        let app = build_router(&self.path, self.endpoint, self.connection, shutdown);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move { shutdown_guard.wait().await })
            .await
            .map_err(|source| WsError::Serve {
                tenant_id: tenant_id.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("Endpoint for demozone {} stopped", tenant_id);
        Ok(())
    }
}

/// Create and bind one endpoint per tenant, in order. The first bind
/// failure aborts the rest.
pub async fn bind_all(
    tenants: &[Tenant],
    config: &EndpointConfig,
    metrics: &Metrics,
) -> WsResult<Vec<EndpointServer>> {
    let mut servers = Vec::with_capacity(tenants.len());
    for tenant in tenants {
        let endpoint = TenantEndpoint::new(tenant, config.channel_capacity, metrics.clone());
        servers.push(EndpointServer::bind(endpoint, config).await?);
    }
    Ok(servers)
}

pub(crate) fn build_router(
    path: &str,
    endpoint: TenantEndpoint,
    config: ConnectionConfig,
    shutdown: ShutdownCoordinator,
) -> Router {
    Router::new()
        .route(path, get(upgrade))
        .with_state(EndpointState {
            endpoint,
            config,
            shutdown,
        })
}

async fn upgrade(State(state): State<EndpointState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: EndpointState) {
    let shutdown_guard = state.shutdown.subscribe_guard();
    let connection = WebSocketConnection::new(state.endpoint, state.config);
    let connection_id = connection.connection_id();

    let (ws_sender, ws_receiver) = socket.split();
    if let Err(e) = connection
        .handle(ws_sender, ws_receiver, shutdown_guard)
        .await
    {
        debug!("Connection {connection_id} ended: {e}");
    }
}
