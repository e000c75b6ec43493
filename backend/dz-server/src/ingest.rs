use crate::{ServerError, ServerResult};

use std::net::SocketAddr;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use dz_config::IngestConfig;
use dz_core::{RelayMessage, RouteSender, ShutdownCoordinator};
use log::{debug, info, warn};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Shared state of the ingestion handler
#[derive(Clone)]
pub(crate) struct IngestState {
    pub(crate) route_tx: RouteSender,
    pub(crate) shutdown: ShutdownCoordinator,
}

/// Build the ingestion router
pub fn build_router(route_tx: RouteSender, shutdown: ShutdownCoordinator) -> Router {
    Router::new()
        .route("/event/{eventname}", post(post_event))
        .with_state(IngestState { route_tx, shutdown })
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Turn an ingestion body into a relay message.
///
/// Accepts `{"demozone": .., "payload": ..}` or the legacy array whose first
/// element carries `payload.data.data_demozone`; the whole array is then the
/// payload. Anything else yields `None`.
pub fn parse_ingest_body(eventname: &str, body: Value) -> Option<RelayMessage> {
    if body.is_array() {
        let demozone = body
            .pointer("/0/payload/data/data_demozone")?
            .as_str()?
            .to_string();
        return Some(RelayMessage {
            demozone: Some(demozone),
            eventname: Some(eventname.to_string()),
            payload: Some(body),
        });
    }

    let Value::Object(mut fields) = body else {
        return None;
    };

    Some(RelayMessage {
        demozone: match fields.remove("demozone") {
            Some(Value::String(demozone)) => Some(demozone),
            _ => None,
        },
        eventname: Some(eventname.to_string()),
        payload: fields.remove("payload"),
    })
}

pub(crate) async fn post_event(
    State(state): State<IngestState>,
    Path(eventname): Path<String>,
    body: Bytes,
) -> StatusCode {
    if state.shutdown.is_shutdown() {
        return StatusCode::SERVICE_UNAVAILABLE;
    }

    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ingest '{}': body is not JSON: {}", eventname, e);
            return StatusCode::BAD_REQUEST;
        }
    };

    let Some(message) = parse_ingest_body(&eventname, value) else {
        warn!("Ingest '{}': unrecognised body, ignoring", eventname);
        return StatusCode::BAD_REQUEST;
    };

    debug!("Ingest '{}' for demozone {:?}", eventname, message.demozone);
    match state.route_tx.send(message).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// HTTP ingestion endpoint bound to its address
pub struct IngestServer {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl IngestServer {
    pub async fn bind(config: &IngestConfig) -> ServerResult<Self> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::IngestBind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::IngestBind { addr, source })?;

        info!("Ingest endpoint listening on http://{}", local_addr);
        Ok(Self {
            listener,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until shutdown is signalled
    pub async fn serve(self, route_tx: RouteSender, shutdown: ShutdownCoordinator) {
        let mut shutdown_guard = shutdown.subscribe_guard();
        let app = build_router(route_tx, shutdown);

        if let Err(e) = axum::serve(self.listener, app)
            .with_graceful_shutdown(async move { shutdown_guard.wait().await })
            .await
        {
            warn!("Ingest endpoint stopped: {}", e);
        }
    }
}
