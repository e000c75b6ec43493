pub mod broadcast_frame;
pub mod client_counter;
pub mod connection_config;
pub mod connection_id;
pub mod endpoint_server;
pub mod error;
pub mod tenant_endpoint;
pub mod web_socket_connection;

#[cfg(test)]
mod tests;

pub use broadcast_frame::BroadcastFrame;
pub use client_counter::ClientCounter;
pub use connection_config::{ConnectionConfig, EndpointConfig};
pub use connection_id::ConnectionId;
pub use endpoint_server::{EndpointServer, bind_all};
pub use error::{Result as WsResult, WsError};
pub use tenant_endpoint::TenantEndpoint;
pub use web_socket_connection::WebSocketConnection;
